//! Data models for par-analyser
//!
//! - Records ingested from the PAR sheets
//! - Pointer triples recovered from record text
//! - Filter state and filter outcome
//! - Findings returned by the summarization service

pub mod filter;
pub mod finding;
pub mod pointer;
pub mod record;

pub use filter::{FilterOutcome, FilterState};
pub use finding::{FindingGroup, FindingRow, Severity};
pub use pointer::PointerTriple;
pub use record::{Record, RecordView, TARGET_COLUMNS};
