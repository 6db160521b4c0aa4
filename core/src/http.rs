//! HTTP request/response values and the JSON fetch primitive.
//!
//! # Design
//! Requests and responses are plain data. `GitHubClient` builds an
//! `HttpRequest`, a `Transport` turns it into an `HttpResponse`, and
//! `read_json` classifies that response without touching the network. This
//! keeps the classification rules deterministic and testable on their own.
//!
//! Failures are reported as a bare numeric code. 404 stays 404, other non-2xx
//! statuses pass through, and every locally detected problem becomes 502.

use serde_json::Value;

use crate::error::{BAD_GATEWAY, NOT_FOUND};
use crate::transport::Transport;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// A received response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Minimal shape check applied to a decoded body before it is accepted.
pub type ShapeCheck = fn(&Value) -> bool;

/// Classify a received response.
pub fn read_json(response: &HttpResponse, validate: Option<ShapeCheck>) -> Result<Value, u16> {
    if response.status == NOT_FOUND {
        return Err(NOT_FOUND);
    }
    if !(200..300).contains(&response.status) {
        return Err(response.status);
    }

    let value: Value = serde_json::from_str(&response.body).map_err(|_| BAD_GATEWAY)?;

    match validate {
        Some(check) if !check(&value) => Err(BAD_GATEWAY),
        _ => Ok(value),
    }
}

/// Perform exactly one request and classify the outcome.
pub fn fetch_json<T>(
    transport: &T,
    request: &HttpRequest,
    validate: Option<ShapeCheck>,
) -> Result<Value, u16>
where
    T: Transport + ?Sized,
{
    tracing::debug!(url = %request.url, "upstream request");
    let response = transport.execute(request).map_err(|err| {
        tracing::warn!(url = %request.url, error = %err, "upstream transport failure");
        BAD_GATEWAY
    })?;
    read_json(&response, validate)
}
