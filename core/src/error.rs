//! Error vocabularies for the relay.
//!
//! # Design
//! Failures narrow through three closed tiers and are never widened again:
//!
//! 1. The transport primitive reports a numeric failure code (`u16`): 404,
//!    the upstream status, or 502 for anything that broke locally.
//! 2. `UpstreamError` is the client's vocabulary, derived purely from that
//!    code.
//! 3. `ServiceError` is what callers see. The mapping from tier 2 is an
//!    exhaustive `From` impl.
//!
//! `ProjectionError` sits beside the tiers. It names the exact field that
//! failed validation, and the service collapses it into
//! `ServiceError::UpstreamInvalidPayload`.

use serde::Serialize;
use thiserror::Error;

/// Failure code used for every locally detected upstream problem:
/// connection errors, unreadable bodies, non-JSON bodies, failed shape checks.
pub const BAD_GATEWAY: u16 = 502;

/// Failure code reserved for "the upstream says this does not exist".
pub const NOT_FOUND: u16 = 404;

/// The HTTP round-trip itself could not be completed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS, TLS or protocol failure before a status was received.
    #[error("request failed: {0}")]
    Request(String),

    /// A status was received but the body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Upstream failure as seen by the GitHub client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamError {
    #[error("not_found")]
    NotFound,

    /// Rate limited or forbidden (403 / 429).
    #[error("unavailable")]
    Unavailable,

    #[error("error")]
    #[serde(rename = "error")]
    Generic,
}

impl UpstreamError {
    /// Narrow a transport failure code into the upstream vocabulary.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => UpstreamError::NotFound,
            403 | 429 => UpstreamError::Unavailable,
            _ => UpstreamError::Generic,
        }
    }
}

/// The five outcomes a caller of the service can observe besides success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceError {
    #[error("not_found")]
    NotFound,

    /// The requested issue is actually a pull request.
    #[error("resource_mismatch")]
    ResourceMismatch,

    #[error("upstream_unavailable")]
    UpstreamUnavailable,

    #[error("upstream_error")]
    UpstreamError,

    #[error("upstream_invalid_payload")]
    UpstreamInvalidPayload,
}

impl ServiceError {
    /// Wire name, identical to the `Display` and serde forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceError::NotFound => "not_found",
            ServiceError::ResourceMismatch => "resource_mismatch",
            ServiceError::UpstreamUnavailable => "upstream_unavailable",
            ServiceError::UpstreamError => "upstream_error",
            ServiceError::UpstreamInvalidPayload => "upstream_invalid_payload",
        }
    }
}

impl From<UpstreamError> for ServiceError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound => ServiceError::NotFound,
            UpstreamError::Unavailable => ServiceError::UpstreamUnavailable,
            UpstreamError::Generic => ServiceError::UpstreamError,
        }
    }
}

/// Which part of an untrusted payload failed validation.
///
/// The `Display` form is a stable dotted identifier meant for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ProjectionError {
    #[error("invalid_issue.object")]
    IssueObject,
    #[error("invalid_issue.number")]
    IssueNumber,
    #[error("invalid_issue.title")]
    IssueTitle,
    #[error("invalid_issue.state")]
    IssueState,
    #[error("invalid_issue.body")]
    IssueBody,
    #[error("invalid_issue.comments")]
    IssueComments,
    #[error("invalid_issue.html_url")]
    IssueHtmlUrl,
    #[error("invalid_issue.created_at")]
    IssueCreatedAt,
    #[error("invalid_issue.author")]
    IssueAuthor,
    #[error("invalid_issue.labels")]
    IssueLabels,
    #[error("invalid_issue.labels_item")]
    IssueLabelsItem,
    #[error("invalid_issue.assignees")]
    IssueAssignees,
    #[error("invalid_issue.assignees_item")]
    IssueAssigneesItem,

    #[error("invalid_comments.array")]
    CommentsArray,
    #[error("invalid_comments.item")]
    CommentsItem,
    #[error("invalid_comments.body")]
    CommentsBody,
    #[error("invalid_comments.created_at")]
    CommentsCreatedAt,
    #[error("invalid_comments.author")]
    CommentsAuthor,
}
