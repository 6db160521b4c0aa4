//! GitHub REST client for the two endpoints the relay needs.
//!
//! # Design
//! `GitHubClient` holds only its base URL, an optional bearer token and a
//! `Transport`. The `build_*` methods produce plain `HttpRequest` values so
//! URLs and headers can be checked without I/O; the `IssueTracker` impl sends
//! them through `fetch_json` and narrows the numeric failure code into
//! `UpstreamError`.
//!
//! `owner` and `repo` are percent-encoded as single path segments, so a value
//! such as `demo/issues/2?x=` can never change which endpoint is requested.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::http::{fetch_json, HttpRequest, ShapeCheck};
use crate::service::IssueTracker;
use crate::transport::Transport;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const USER_AGENT: &str = "llmable-github/0.1";
pub const ACCEPT: &str = "application/vnd.github+json";

/// Comments fetched per issue. Only the first page is ever requested.
pub const COMMENTS_PER_PAGE: u32 = 100;

/// URL path percent-encode set plus the segment and escape delimiters.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Stateless client for the GitHub issues API.
#[derive(Debug, Clone)]
pub struct GitHubClient<T> {
    base_url: String,
    token: Option<String>,
    transport: T,
}

impl<T: Transport> GitHubClient<T> {
    /// Client against the public GitHub API.
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, GITHUB_API_BASE)
    }

    pub fn with_base_url(transport: T, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            transport,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_issue(&self, owner: &str, repo: &str, number: u64) -> HttpRequest {
        HttpRequest {
            url: format!("{}/issues/{number}", self.repo_url(owner, repo)),
            headers: self.headers(),
        }
    }

    pub fn build_list_comments(&self, owner: &str, repo: &str, number: u64) -> HttpRequest {
        HttpRequest {
            url: format!(
                "{}/issues/{number}/comments?per_page={COMMENTS_PER_PAGE}",
                self.repo_url(owner, repo)
            ),
            headers: self.headers(),
        }
    }

    fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            self.base_url,
            utf8_percent_encode(owner, PATH_SEGMENT),
            utf8_percent_encode(repo, PATH_SEGMENT)
        )
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("accept".to_string(), ACCEPT.to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    fn get(&self, request: HttpRequest, validate: ShapeCheck) -> Result<Value, UpstreamError> {
        fetch_json(&self.transport, &request, Some(validate)).map_err(UpstreamError::from_status)
    }
}

impl<T: Transport> IssueTracker for GitHubClient<T> {
    fn fetch_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Value, UpstreamError> {
        self.get(self.build_get_issue(owner, repo, number), is_issue_shaped)
    }

    // TODO: follow the `Link: rel="next"` header once more than one page is wanted.
    fn fetch_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Value, UpstreamError> {
        self.get(self.build_list_comments(owner, repo, number), Value::is_array)
    }
}

fn is_issue_shaped(value: &Value) -> bool {
    value.get("number").is_some_and(Value::is_number)
}
