//! HTTP rendering of `ServiceError`.
//!
//! The status table is fixed; the body is always `{"error": "<name>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use llmable_core::ServiceError;
use serde::Serialize;

pub fn status_for(err: ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::ResourceMismatch => StatusCode::CONFLICT,
        ServiceError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::UpstreamInvalidPayload => StatusCode::BAD_GATEWAY,
        ServiceError::UpstreamError => StatusCode::BAD_GATEWAY,
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ServiceError,
}

/// A service failure ready to be returned from a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorResponse(pub ServiceError);

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = status_for(self.0);
        tracing::debug!(error = self.0.as_str(), %status, "request failed");
        (status, Json(ErrorBody { error: self.0 })).into_response()
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        ErrorResponse(err)
    }
}
