//! Reshape validated data into the public `LlmableIssue` contract.

use crate::types::{
    CommentItemSubset, CommentsSection, ContentSection, IssueSection, IssueSubset, LlmableIssue,
    SourceSection,
};

/// Build the response body. Pure and infallible.
///
/// `total_count` prefers the issue's own comment count and only falls back to
/// the number of fetched comments when that count is absent.
pub fn to_llmable_issue(
    owner: &str,
    repo: &str,
    issue_number: u64,
    issue: IssueSubset,
    comments: Vec<CommentItemSubset>,
) -> LlmableIssue {
    let total_count = issue
        .comments_total_count
        .unwrap_or(comments.len() as u64);

    LlmableIssue {
        source: SourceSection {
            owner: owner.to_string(),
            repo: repo.to_string(),
            issue_number,
            html_url: issue.html_url,
        },
        issue: IssueSection {
            number: issue.number,
            title: issue.title,
            state: issue.state,
            author: issue.author,
            labels: issue.labels,
            assignees: issue.assignees,
            created_at: issue.created_at,
        },
        content: ContentSection {
            body_markdown: issue.body_markdown,
        },
        comments: CommentsSection {
            total_count,
            items: comments,
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn base_issue() -> IssueSubset {
        IssueSubset {
            number: 123,
            title: "Add feature X".to_string(),
            state: "open".to_string(),
            author: "alice".to_string(),
            labels: vec!["enhancement".to_string(), "good-first-issue".to_string()],
            assignees: vec!["bob".to_string(), "carol".to_string()],
            created_at: "2024-08-01T12:34:56Z".to_string(),
            body_markdown: "Please add feature X".to_string(),
            html_url: "https://github.com/owner/repo/issues/123".to_string(),
            comments_total_count: Some(5),
        }
    }

    fn comments() -> Vec<CommentItemSubset> {
        vec![
            CommentItemSubset {
                author: "dave".to_string(),
                body_markdown: "sounds good".to_string(),
            },
            CommentItemSubset {
                author: "erin".to_string(),
                body_markdown: "+1".to_string(),
            },
        ]
    }

    #[test]
    fn maps_fields_and_prefers_issue_comment_count() {
        let out = to_llmable_issue("owner", "repo", 123, base_issue(), comments());

        assert_eq!(out.source.owner, "owner");
        assert_eq!(out.source.repo, "repo");
        assert_eq!(out.source.issue_number, 123);
        assert_eq!(out.source.html_url, "https://github.com/owner/repo/issues/123");
        assert_eq!(out.issue.number, 123);
        assert_eq!(out.issue.title, "Add feature X");
        assert_eq!(out.issue.state, "open");
        assert_eq!(out.issue.author, "alice");
        assert_eq!(out.issue.labels, ["enhancement", "good-first-issue"]);
        assert_eq!(out.issue.assignees, ["bob", "carol"]);
        assert_eq!(out.issue.created_at, "2024-08-01T12:34:56Z");
        assert_eq!(out.content.body_markdown, "Please add feature X");

        assert_eq!(out.comments.total_count, 5);
        assert_eq!(out.comments.items, comments());
    }

    #[test]
    fn authoritative_count_may_be_smaller_than_fetched() {
        let issue = IssueSubset {
            comments_total_count: Some(0),
            ..base_issue()
        };
        let out = to_llmable_issue("owner", "repo", 123, issue, comments());
        assert_eq!(out.comments.total_count, 0);
        assert_eq!(out.comments.items.len(), 2);
    }

    #[test]
    fn falls_back_to_fetched_count() {
        let issue = IssueSubset {
            comments_total_count: None,
            ..base_issue()
        };
        let out = to_llmable_issue("owner", "repo", 123, issue, comments());
        assert_eq!(out.comments.total_count, 2);
    }

    #[test]
    fn serialized_shape() {
        let out = to_llmable_issue("owner", "repo", 123, base_issue(), comments());
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "source": {
                    "owner": "owner",
                    "repo": "repo",
                    "issue_number": 123,
                    "html_url": "https://github.com/owner/repo/issues/123"
                },
                "issue": {
                    "number": 123,
                    "title": "Add feature X",
                    "state": "open",
                    "author": "alice",
                    "labels": ["enhancement", "good-first-issue"],
                    "assignees": ["bob", "carol"],
                    "created_at": "2024-08-01T12:34:56Z"
                },
                "content": { "body_markdown": "Please add feature X" },
                "comments": {
                    "total_count": 5,
                    "items": [
                        { "author": "dave", "body_markdown": "sounds good" },
                        { "author": "erin", "body_markdown": "+1" }
                    ]
                }
            })
        );
    }
}
