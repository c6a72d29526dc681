//! HTTP API handlers for par-analyser
//!
//! Thin presentation boundary over the record pipeline and the feedback flow.

pub mod feedback;
pub mod health;
pub mod records;

pub use feedback::feedback_routes;
pub use health::health_routes;
pub use records::record_routes;

use axum::http::Uri;

use crate::ApiError;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
