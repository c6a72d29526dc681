//! Error types for par-analyser
//!
//! Collaborator errors convert into [`ApiError`], which renders as
//! `{"error": {"code", "message"}}` with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::{IngestError, SummarizerError};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - e.g., feedback generation already running
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upstream service failed (502, or 503 when not configured)
    #[error("Upstream error: {message}")]
    Upstream { message: String, unavailable: bool },
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        ApiError::Upstream {
            message: err.to_string(),
            unavailable: false,
        }
    }
}

impl From<SummarizerError> for ApiError {
    fn from(err: SummarizerError) -> Self {
        ApiError::Upstream {
            unavailable: matches!(err, SummarizerError::NotConfigured),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Upstream {
                message,
                unavailable: true,
            } => (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE", message),
            ApiError::Upstream { message, .. } => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message)
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
