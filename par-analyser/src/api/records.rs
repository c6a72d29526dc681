//! Record endpoints
//!
//! Source listing, ingestion refresh, and filtered record queries.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::models::{FilterState, RecordView};
use crate::services::record_filter;
use crate::{ApiResult, AppState};

/// Configured source tags, in merge order
#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Number of merged records now held
    pub record_count: usize,
}

/// Filtered records plus the conduct labels offered for selection
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub records: Vec<RecordView>,
    /// Canonical conducts present under the source filter alone, sorted
    pub observable_conducts: Vec<String>,
    pub matched: usize,
    pub total: usize,
}

/// GET /api/sources
pub async fn list_sources(State(state): State<AppState>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        sources: state
            .ingestor
            .sources()
            .iter()
            .map(|source| source.tag.clone())
            .collect(),
    })
}

/// POST /api/records/refresh
///
/// Re-fetches every source. On failure the previous records stay in place.
pub async fn refresh_records(State(state): State<AppState>) -> ApiResult<Json<RefreshResponse>> {
    let record_count = state.refresh_records().await?;
    Ok(Json(RefreshResponse { record_count }))
}

/// POST /api/records/query
pub async fn query_records(
    State(state): State<AppState>,
    Json(filter): Json<FilterState>,
) -> Json<QueryResponse> {
    let records = state.records.read().await;
    let outcome = record_filter::apply(&records, &filter);

    tracing::debug!(
        sources = filter.source_tags.len(),
        conducts = filter.conducts.len(),
        matched = outcome.filtered.len(),
        "Record query"
    );

    Json(QueryResponse {
        matched: outcome.filtered.len(),
        total: records.len(),
        records: outcome.filtered.into_iter().map(RecordView::from).collect(),
        observable_conducts: outcome.observable_conducts.into_iter().collect(),
    })
}

/// Build record routes
pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sources", get(list_sources))
        .route("/api/records/refresh", post(refresh_records))
        .route("/api/records/query", post(query_records))
}
