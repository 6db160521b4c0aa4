//! Issue relay core: fetch a GitHub issue and its comments, validate the
//! untrusted JSON, and reshape it into a small stable contract.
//!
//! # Overview
//! - `http` / `transport`: one GET per call, classified into a value or a
//!   numeric failure code.
//! - `client`: the two GitHub endpoints, narrowing failure codes into
//!   `UpstreamError`.
//! - `projection`: all-or-nothing validation of issue and comment payloads.
//! - `service`: sequences the calls and owns the mapping to `ServiceError`.
//! - `presenter`: pure reshaping into `LlmableIssue`.
//!
//! # Design
//! - The core is synchronous and holds no state between calls; the HTTP
//!   boundary lives in the server crate.
//! - `IssueTracker` is the seam for substituting the upstream in tests.

pub mod client;
pub mod error;
pub mod http;
pub mod presenter;
pub mod projection;
pub mod service;
pub mod transport;
pub mod types;

pub use client::GitHubClient;
pub use error::{ProjectionError, ServiceError, TransportError, UpstreamError};
pub use http::{HttpRequest, HttpResponse};
pub use service::{get_llmable_issue, IssueTracker};
pub use transport::{Transport, UreqTransport};
pub use types::{CommentItemSubset, IssueSubset, LlmableIssue};
