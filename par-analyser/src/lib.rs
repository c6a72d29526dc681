//! par-analyser library interface
//!
//! Exposes the PAR pipeline (models and services) and the HTTP router for
//! the binary and for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::models::{FindingRow, Record};
use crate::services::{IngestError, RecordIngestor, Summarizer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Fetches and merges all configured sources
    pub ingestor: Arc<RecordIngestor>,
    /// External summarization service
    pub summarizer: Arc<dyn Summarizer>,
    /// Merged records, newest first
    pub records: Arc<RwLock<Vec<Record>>>,
    /// Findings of the latest successful generate
    pub findings: Arc<RwLock<Vec<FindingRow>>>,
    /// Set while a feedback generate is in flight
    pub generating: Arc<AtomicBool>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(ingestor: RecordIngestor, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
            summarizer,
            records: Arc::new(RwLock::new(Vec::new())),
            findings: Arc::new(RwLock::new(Vec::new())),
            generating: Arc::new(AtomicBool::new(false)),
            startup_time: par_common::time::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Re-run ingestion and replace the held records
    ///
    /// On failure the previous records are kept and the error is recorded
    /// in `last_error`. Returns the new record count.
    pub async fn refresh_records(&self) -> Result<usize, IngestError> {
        match self.ingestor.ingest().await {
            Ok(records) => {
                let count = records.len();
                *self.records.write().await = records;
                *self.last_error.write().await = None;
                info!(records = count, "Records refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(source = %e.source_tag(), error = %e, "Refresh failed, keeping previous records");
                *self.last_error.write().await = Some(e.to_string());
                Err(e)
            }
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::record_routes())
        .merge(api::feedback_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
