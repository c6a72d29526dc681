//! PAR record model
//!
//! A record is created once per ingestion cycle and never modified. The
//! canonical conduct label is always derived on demand from the raw name so
//! that the original text stays available for display.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

use super::PointerTriple;
use crate::services::{conduct_normalizer, pointer_parser};

/// Sheet column holding the record date
pub const DATE_COLUMN: &str = "Date";
/// Sheet column holding the raw conduct name
pub const CONDUCT_COLUMN: &str = "Conduct_Name";
/// Sheet column holding the free-text pointers blob
pub const POINTERS_COLUMN: &str = "Pointers";
/// Sheet column holding the submitter identifier
pub const SUBMITTED_BY_COLUMN: &str = "Submitted_By";

/// Columns projected from every sheet row
pub const TARGET_COLUMNS: [&str; 4] = [
    DATE_COLUMN,
    CONDUCT_COLUMN,
    POINTERS_COLUMN,
    SUBMITTED_BY_COLUMN,
];

/// One Post-Action Review entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    date: String,
    conduct_name: String,
    pointers_text: String,
    submitted_by: String,
    source_tag: String,
}

impl Record {
    pub fn new(
        source_tag: impl Into<String>,
        date: impl Into<String>,
        conduct_name: impl Into<String>,
        pointers_text: impl Into<String>,
        submitted_by: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            conduct_name: conduct_name.into(),
            pointers_text: pointers_text.into(),
            submitted_by: submitted_by.into(),
            source_tag: source_tag.into(),
        }
    }

    /// Project a decoded sheet row onto the record fields
    ///
    /// Absent columns become empty strings.
    pub fn from_row(source_tag: &str, row: &HashMap<String, String>) -> Self {
        let column = |name: &str| row.get(name).cloned().unwrap_or_default();
        Self::new(
            source_tag,
            column(DATE_COLUMN),
            column(CONDUCT_COLUMN),
            column(POINTERS_COLUMN),
            column(SUBMITTED_BY_COLUMN),
        )
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn conduct_name(&self) -> &str {
        &self.conduct_name
    }

    pub fn pointers_text(&self) -> &str {
        &self.pointers_text
    }

    pub fn submitted_by(&self) -> &str {
        &self.submitted_by
    }

    pub fn source_tag(&self) -> &str {
        &self.source_tag
    }

    /// Date used for ordering; `None` when unparsable
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        par_common::time::parse_record_date(&self.date)
    }

    /// Canonical conduct label (derived, never stored)
    pub fn canonical_conduct(&self) -> String {
        conduct_normalizer::normalize(&self.conduct_name)
    }

    /// Pointer triples recovered from the free-text blob
    pub fn pointers(&self) -> Vec<PointerTriple> {
        pointer_parser::parse(&self.pointers_text)
    }

    /// Submitter as shown to users: underscores become spaces, upper-cased
    pub fn submitted_by_display(&self) -> String {
        self.submitted_by.replace('_', " ").to_uppercase()
    }
}

/// Display snapshot of a record for the presentation boundary
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub date: String,
    pub conduct_name: String,
    pub conduct_display: String,
    pub canonical_conduct: String,
    pub pointers: Vec<PointerTriple>,
    pub has_pointers: bool,
    pub submitted_by: String,
    pub source_tag: String,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        let pointers = record.pointers();
        Self {
            date: record.date.clone(),
            conduct_name: record.conduct_name.clone(),
            conduct_display: record.conduct_name.to_uppercase(),
            canonical_conduct: record.canonical_conduct(),
            has_pointers: !pointers.is_empty(),
            pointers,
            submitted_by: record.submitted_by_display(),
            source_tag: record.source_tag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_row_projects_target_columns() {
        let r = Record::from_row(
            "ALPHA",
            &row(&[
                ("Date", "2024-01-02"),
                ("Conduct_Name", "S&P 2"),
                ("Pointers", "Observation\nA"),
                ("Submitted_By", "cpl_tan"),
                ("Timestamp", "ignored"),
            ]),
        );
        assert_eq!(r.source_tag(), "ALPHA");
        assert_eq!(r.date(), "2024-01-02");
        assert_eq!(r.conduct_name(), "S&P 2");
        assert_eq!(r.pointers_text(), "Observation\nA");
        assert_eq!(r.submitted_by(), "cpl_tan");
    }

    #[test]
    fn test_from_row_missing_columns_are_empty() {
        let r = Record::from_row("BRAVO", &row(&[("Date", "2024-01-02")]));
        assert_eq!(r.conduct_name(), "");
        assert_eq!(r.pointers_text(), "");
        assert_eq!(r.submitted_by(), "");
    }

    #[test]
    fn test_canonical_conduct_is_derived() {
        let r = Record::new("ALPHA", "", "strength and power (makeup)", "", "");
        assert_eq!(r.canonical_conduct(), "STRENGTH AND POWER");
        assert_eq!(r.conduct_name(), "strength and power (makeup)");
    }

    #[test]
    fn test_view_display_fields() {
        let r = Record::new(
            "MSC",
            "2024-01-02",
            "Route march 3",
            "Observation\nA\nReflection\nB\nRecommendation\nC",
            "lta_john_lim",
        );
        let view = RecordView::from(&r);
        assert_eq!(view.conduct_display, "ROUTE MARCH 3");
        assert_eq!(view.canonical_conduct, "ROUTE MARCH");
        assert_eq!(view.submitted_by, "LTA JOHN LIM");
        assert!(view.has_pointers);
        assert_eq!(view.pointers.len(), 1);
    }

    #[test]
    fn test_view_without_pointers() {
        let r = Record::new("MSC", "", "ER", "no structured text", "");
        let view = RecordView::from(&r);
        assert!(!view.has_pointers);
        assert!(view.pointers.is_empty());
    }
}
