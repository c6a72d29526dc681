//! Feedback response aggregator
//!
//! Turns the summarization reply into typed findings and groups them by
//! category for tabular display.
//!
//! The reply is untrusted: it may be wrapped in a Markdown code fence, may
//! omit optional fields, or may not be JSON at all. Undecodable replies are
//! a recoverable [`AggregateError`], never a panic.

use std::collections::HashMap;
use thiserror::Error;

use crate::models::{FindingGroup, FindingRow};

const FENCE: &str = "```";
const SNIPPET_CHARS: usize = 200;

/// Aggregation errors
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Reply was not a JSON array of findings
    #[error("Invalid findings JSON: {message} (reply starts with: {snippet:?})")]
    InvalidJson { message: String, snippet: String },
}

/// Aggregate a text reply expected to contain a JSON array
pub fn aggregate(text: &str) -> Result<Vec<FindingRow>, AggregateError> {
    let body = strip_code_fence(text);
    serde_json::from_str(body).map_err(|e| AggregateError::InvalidJson {
        message: e.to_string(),
        snippet: snippet(text),
    })
}

/// Remove an optional leading fence (with language tag) and trailing fence
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        body = rest[tag_len..].trim_start();
    }

    body.strip_suffix(FENCE).unwrap_or(body)
}

/// Group findings by category
///
/// Groups appear in first-seen category order; members keep arrival order.
pub fn group(findings: &[FindingRow]) -> Vec<FindingGroup> {
    let mut groups: Vec<FindingGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for finding in findings {
        let slot = *index.entry(finding.category.as_str()).or_insert_with(|| {
            groups.push(FindingGroup {
                category: finding.category.clone(),
                findings: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].findings.push(finding.clone());
    }

    groups
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}
