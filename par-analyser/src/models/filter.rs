//! Filter state and filter outcome

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Record;

/// Compound filter over source tags and canonical conduct labels
///
/// An empty set means "no restriction on that dimension", never
/// "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Allowed source tags (empty = all sources)
    #[serde(default)]
    pub source_tags: BTreeSet<String>,
    /// Allowed canonical conduct labels (empty = all conducts)
    #[serde(default)]
    pub conducts: BTreeSet<String>,
}

impl FilterState {
    pub fn new<S, C>(source_tags: S, conducts: C) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            source_tags: source_tags.into_iter().map(Into::into).collect(),
            conducts: conducts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches_source(&self, source_tag: &str) -> bool {
        self.source_tags.is_empty() || self.source_tags.contains(source_tag)
    }

    pub fn matches_conduct(&self, canonical: &str) -> bool {
        self.conducts.is_empty() || self.conducts.contains(canonical)
    }
}

/// Result of one filter evaluation
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome<'a> {
    /// Records matching both dimensions, in input order
    pub filtered: Vec<&'a Record>,
    /// Canonical labels present under the source filter alone
    pub observable_conducts: BTreeSet<String>,
}
