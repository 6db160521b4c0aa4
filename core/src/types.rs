//! Validated issue data and the public response shape.
//!
//! # Design
//! `IssueSubset` and `CommentItemSubset` are what the projector produces from
//! untrusted upstream JSON. `LlmableIssue` is the stable contract handed to
//! callers; its JSON field names are part of that contract.

use serde::{Deserialize, Serialize};

/// The fields of an upstream issue that survive projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSubset {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub author: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    /// ISO-8601 as received; not reparsed.
    pub created_at: String,
    pub body_markdown: String,
    pub html_url: String,
    /// Comment count reported by the issue itself. Authoritative even when it
    /// disagrees with the number of comments actually fetched.
    pub comments_total_count: Option<u64>,
}

/// A single comment, reduced to author and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentItemSubset {
    pub author: String,
    pub body_markdown: String,
}

/// Response body returned for one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmableIssue {
    pub source: SourceSection,
    pub issue: IssueSection,
    pub content: ContentSection,
    pub comments: CommentsSection,
}

/// Where the issue came from, as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSection {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSection {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub author: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub body_markdown: String,
}

/// `total_count` may differ from `items.len()`; only one page is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsSection {
    pub total_count: u64,
    pub items: Vec<CommentItemSubset>,
}
