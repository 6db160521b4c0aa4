//! HTTP boundary for the issue relay.
//!
//! Routes:
//! - `GET /health` → `{"ok": true}`
//! - `GET /{owner}/{repo}/issues/{number}` → `LlmableIssue` or an error body
//! - anything else → `404 {"error": "not_found"}`

pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use llmable_core::{get_llmable_issue, IssueTracker, ServiceError};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ErrorResponse;

/// Upstream shared by every request.
pub type SharedTracker = Arc<dyn IssueTracker + Send + Sync>;

#[derive(Clone)]
struct AppState {
    tracker: SharedTracker,
}

pub fn app(tracker: SharedTracker) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/health", get(health))
        .route("/{owner}/{repo}/issues/{number}", get(get_issue))
        .fallback(not_found)
        .layer(trace)
        .with_state(AppState { tracker })
}

pub async fn run(listener: TcpListener, tracker: SharedTracker) -> Result<(), std::io::Error> {
    axum::serve(listener, app(tracker)).await
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn not_found() -> ErrorResponse {
    ErrorResponse(ServiceError::NotFound)
}

async fn get_issue(
    State(state): State<AppState>,
    Path((owner, repo, number)): Path<(String, String, String)>,
) -> Response {
    let Ok(number) = number.parse::<u64>() else {
        return ErrorResponse(ServiceError::NotFound).into_response();
    };
    if !is_name(&owner) || !is_name(&repo) {
        return ErrorResponse(ServiceError::NotFound).into_response();
    }

    // The upstream transport blocks; keep it off the async workers.
    let tracker = Arc::clone(&state.tracker);
    let joined = tokio::task::spawn_blocking(move || {
        get_llmable_issue(tracker.as_ref(), &owner, &repo, number)
    })
    .await;

    match joined {
        Ok(Ok(issue)) => Json(issue).into_response(),
        Ok(Err(err)) => ErrorResponse(err).into_response(),
        Err(join_err) => {
            tracing::error!(error = %join_err, "issue lookup task failed");
            ErrorResponse(ServiceError::UpstreamError).into_response()
        }
    }
}

/// Dot segments would be resolved upstream even when percent-encoded.
fn is_name(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}
