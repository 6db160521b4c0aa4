//! Orchestration: fetch, guard, project, present.
//!
//! `get_llmable_issue` is all-or-nothing. It either returns a complete
//! `LlmableIssue` or exactly one `ServiceError`; it never returns partial
//! results. The only failure it recovers from locally is a 404 on the
//! comments endpoint, which is treated as "no comments".

use serde_json::Value;

use crate::error::{ServiceError, UpstreamError};
use crate::presenter::to_llmable_issue;
use crate::projection::{project_comments, project_issue};
use crate::types::LlmableIssue;

/// Source of raw issue payloads.
///
/// `GitHubClient` is the production implementation; tests substitute fakes.
pub trait IssueTracker {
    fn fetch_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Value, UpstreamError>;

    /// First page of the issue's comments as a raw JSON array.
    fn fetch_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Value, UpstreamError>;
}

/// Fetch one issue plus its comments and reshape them for the caller.
pub fn get_llmable_issue<T>(
    tracker: &T,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<LlmableIssue, ServiceError>
where
    T: IssueTracker + ?Sized,
{
    let issue_raw = tracker.fetch_issue(owner, repo, number)?;

    if is_pull_request(&issue_raw) {
        tracing::debug!(owner, repo, number, "issue number refers to a pull request");
        return Err(ServiceError::ResourceMismatch);
    }

    let issue = project_issue(&issue_raw).map_err(|reason| {
        tracing::warn!(owner, repo, number, %reason, "rejected issue payload");
        ServiceError::UpstreamInvalidPayload
    })?;

    let comments_raw = match tracker.fetch_issue_comments(owner, repo, number) {
        Ok(value) => value,
        Err(UpstreamError::NotFound) => Value::Array(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let comments = project_comments(&comments_raw).map_err(|reason| {
        tracing::warn!(owner, repo, number, %reason, "rejected comments payload");
        ServiceError::UpstreamInvalidPayload
    })?;

    Ok(to_llmable_issue(owner, repo, number, issue, comments))
}

/// The issues endpoint also serves pull requests; those carry a `pull_request` key.
fn is_pull_request(raw: &Value) -> bool {
    raw.as_object().is_some_and(|obj| obj.contains_key("pull_request"))
}
