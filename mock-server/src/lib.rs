//! Fake GitHub issues API for tests and local runs.
//!
//! Serves the two endpoints the relay calls from fixtures registered per
//! `(owner, repo, number)`. Every request is appended to a shared log so tests
//! can check URLs and headers.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// What one endpoint answers with.
#[derive(Clone, Debug)]
pub enum Reply {
    /// 200 with this JSON body.
    Json(Value),
    /// This status with a GitHub-style `{"message": ...}` body.
    Status(u16),
    /// This status with a verbatim body.
    Raw(u16, String),
}

/// Replies for one issue and its comments endpoint.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub issue: Reply,
    pub comments: Reply,
}

impl Fixture {
    pub fn new(issue: Value, comments: Value) -> Self {
        Self {
            issue: Reply::Json(issue),
            comments: Reply::Json(comments),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IssueKey {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// One request as seen by the fake.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
    pub authorization: Option<String>,
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

/// Fixture set plus the request log it shares with the running app.
#[derive(Clone, Debug, Default)]
pub struct Upstream {
    fixtures: HashMap<IssueKey, Fixture>,
    log: RequestLog,
}

impl Upstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, owner: &str, repo: &str, number: u64, fixture: Fixture) -> Self {
        let key = IssueKey {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        };
        self.fixtures.insert(key, fixture);
        self
    }

    /// Handle onto the request log; stays live after `app` consumes `self`.
    pub fn log(&self) -> RequestLog {
        Arc::clone(&self.log)
    }
}

#[derive(Clone)]
struct AppState {
    fixtures: Arc<HashMap<IssueKey, Fixture>>,
    log: RequestLog,
}

pub fn app(upstream: Upstream) -> Router {
    let state = AppState {
        fixtures: Arc::new(upstream.fixtures),
        log: upstream.log,
    };
    Router::new()
        .route("/repos/{owner}/{repo}/issues/{number}", get(get_issue))
        .route("/repos/{owner}/{repo}/issues/{number}/comments", get(list_comments))
        .fallback(not_found)
        .with_state(state)
}

pub async fn run(listener: TcpListener, upstream: Upstream) -> Result<(), std::io::Error> {
    axum::serve(listener, app(upstream)).await
}

/// A small, valid issue payload in GitHub's shape.
pub fn sample_issue(number: u64) -> Value {
    json!({
        "number": number,
        "title": "Crash when parsing empty config",
        "state": "open",
        "body": "Steps to reproduce:\n\n1. touch config.toml\n2. run",
        "comments": 2,
        "html_url": format!("https://github.com/octo/demo/issues/{number}"),
        "created_at": "2024-03-01T09:00:00Z",
        "user": { "login": "octocat", "id": 1 },
        "labels": [{ "name": "bug", "color": "d73a4a" }, "triage"],
        "assignees": [{ "login": "hubot" }],
        "locked": false
    })
}

/// Comments for `sample_issue`, deliberately out of order.
pub fn sample_comments() -> Value {
    json!([
        { "user": { "login": "hubot" }, "body": "Fixed in #8.", "created_at": "2024-03-02T10:00:00Z" },
        { "user": { "login": "monalisa" }, "body": "Can reproduce.", "created_at": "2024-03-01T12:00:00Z" }
    ])
}

async fn record(log: &RequestLog, uri: &Uri, headers: &HeaderMap) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    log.write().await.push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_owned),
        accept: header_value(header::ACCEPT),
        user_agent: header_value(header::USER_AGENT),
        authorization: header_value(header::AUTHORIZATION),
    });
}

fn lookup<'a>(state: &'a AppState, owner: String, repo: String, number: &str) -> Option<&'a Fixture> {
    let number = number.parse().ok()?;
    state.fixtures.get(&IssueKey { owner, repo, number })
}

async fn get_issue(
    State(state): State<AppState>,
    Path((owner, repo, number)): Path<(String, String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state.log, &uri, &headers).await;
    match lookup(&state, owner, repo, &number) {
        Some(fixture) => respond(&fixture.issue),
        None => respond(&Reply::Status(404)),
    }
}

async fn list_comments(
    State(state): State<AppState>,
    Path((owner, repo, number)): Path<(String, String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state.log, &uri, &headers).await;
    match lookup(&state, owner, repo, &number) {
        Some(fixture) => respond(&fixture.comments),
        None => respond(&Reply::Status(404)),
    }
}

async fn not_found(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    record(&state.log, &uri, &headers).await;
    respond(&Reply::Status(404))
}

fn respond(reply: &Reply) -> Response {
    match reply {
        Reply::Json(value) => Json(value.clone()).into_response(),
        Reply::Status(code) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let message = status.canonical_reason().unwrap_or("Error");
            (status, Json(json!({ "message": message }))).into_response()
        }
        Reply::Raw(code, body) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body.clone()).into_response()
        }
    }
}
