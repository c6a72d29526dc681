//! Filter engine
//!
//! Applies a [`FilterState`] to the merged records. Besides the filtered
//! records it reports which canonical conducts exist under the *source*
//! filter alone, so a selection UI only offers conducts that can match.
//! That set must never depend on the conduct filter.

use crate::models::{FilterOutcome, FilterState, Record};

/// Evaluate a filter over the records
///
/// Pure and synchronous; the input order is preserved.
pub fn apply<'a>(records: &'a [Record], state: &FilterState) -> FilterOutcome<'a> {
    let mut outcome = FilterOutcome::default();

    for record in records {
        if !state.matches_source(record.source_tag()) {
            continue;
        }

        let canonical = record.canonical_conduct();
        let matches_conduct = state.matches_conduct(&canonical);
        outcome.observable_conducts.insert(canonical);

        if matches_conduct {
            outcome.filtered.push(record);
        }
    }

    outcome
}
