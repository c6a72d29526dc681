//! Feedback endpoints
//!
//! Generates categorized findings for the filtered records through the
//! summarization service, and serves the latest findings grouped by
//! category. Only one generate may run at a time.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::{FilterState, FindingRow};
use crate::services::{feedback_aggregator, feedback_prompt, record_filter};
use crate::{ApiError, ApiResult, AppState};

/// One finding with its display tone
#[derive(Debug, Serialize)]
pub struct FindingView {
    #[serde(flatten)]
    pub finding: FindingRow,
    /// Badge tone derived from severity
    pub tone: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FindingGroupView {
    pub category: String,
    pub findings: Vec<FindingView>,
}

/// Grouped findings
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub groups: Vec<FindingGroupView>,
    pub total: usize,
    /// Set when the reply could not be turned into findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl FeedbackResponse {
    fn from_findings(findings: &[FindingRow]) -> Self {
        let groups = feedback_aggregator::group(findings)
            .into_iter()
            .map(|group| FindingGroupView {
                category: group.category,
                findings: group
                    .findings
                    .into_iter()
                    .map(|finding| FindingView {
                        tone: finding.severity.tone(),
                        finding,
                    })
                    .collect(),
            })
            .collect();

        Self {
            groups,
            total: findings.len(),
            notice: None,
        }
    }

    fn notice(message: impl Into<String>) -> Self {
        Self {
            groups: Vec::new(),
            total: 0,
            notice: Some(message.into()),
        }
    }
}

/// Raw passthrough request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub user_message: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

/// Holds the in-flight flag; released on drop
struct GenerateGuard {
    flag: Arc<AtomicBool>,
}

impl GenerateGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: Arc::clone(flag) })
    }
}

impl Drop for GenerateGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// POST /api/feedback
///
/// Filters the held records, sends their pointers to the summarization
/// service, and stores the resulting findings. A reply that is not valid
/// findings JSON yields an empty result with a notice, not an error.
pub async fn generate_feedback(
    State(state): State<AppState>,
    Json(filter): Json<FilterState>,
) -> ApiResult<Json<FeedbackResponse>> {
    if filter.conducts.is_empty() {
        return Err(ApiError::BadRequest("Select at least one conduct".to_string()));
    }

    let _guard = GenerateGuard::acquire(&state.generating)
        .ok_or_else(|| ApiError::Conflict("Feedback generation already in progress".to_string()))?;

    state.findings.write().await.clear();

    let (matched, body) = {
        let records = state.records.read().await;
        let outcome = record_filter::apply(&records, &filter);
        (
            outcome.filtered.len(),
            feedback_prompt::build_request(outcome.filtered.iter().copied()),
        )
    };

    if matched == 0 {
        return Err(ApiError::BadRequest("No records match the current filter".to_string()));
    }
    if body.is_empty() {
        return Err(ApiError::BadRequest(
            "Matching records contain no PAR pointers".to_string(),
        ));
    }

    info!(records = matched, body_chars = body.len(), "Generating feedback");

    let reply = state
        .summarizer
        .summarize(feedback_prompt::SYSTEM_PROMPT, &body)
        .await
        .map_err(|e| {
            error!(error = %e, "Summarization failed");
            e
        })?;

    match feedback_aggregator::aggregate(&reply) {
        Ok(findings) => {
            info!(findings = findings.len(), "Feedback generated");
            let response = FeedbackResponse::from_findings(&findings);
            *state.findings.write().await = findings;
            Ok(Json(response))
        }
        Err(e) => {
            warn!(error = %e, "Summarization reply is not valid findings JSON");
            Ok(Json(FeedbackResponse::notice(
                "The summarization service returned an unreadable response. Please try again.",
            )))
        }
    }
}

/// GET /api/feedback
pub async fn get_feedback(State(state): State<AppState>) -> Json<FeedbackResponse> {
    let findings = state.findings.read().await;
    Json(FeedbackResponse::from_findings(&findings))
}

/// DELETE /api/feedback
pub async fn clear_feedback(State(state): State<AppState>) -> StatusCode {
    state.findings.write().await.clear();
    StatusCode::NO_CONTENT
}

/// POST /api/generateFeedback
///
/// Sends the caller's text with the fixed system instruction and returns
/// the raw reply.
pub async fn generate_raw(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    if request.user_message.trim().is_empty() {
        return Err(ApiError::BadRequest("userMessage must not be empty".to_string()));
    }

    let result = state
        .summarizer
        .summarize(feedback_prompt::SYSTEM_PROMPT, &request.user_message)
        .await?;

    Ok(Json(GenerateResponse { result }))
}

/// Build feedback routes
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/feedback",
            post(generate_feedback).get(get_feedback).delete(clear_feedback),
        )
        .route("/api/generateFeedback", post(generate_raw))
}
