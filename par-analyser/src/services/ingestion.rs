//! Record ingestion and merge
//!
//! Fetches every configured sheet concurrently, projects rows onto
//! [`Record`]s tagged with their source, and merges everything into one
//! sequence ordered newest first.
//!
//! The join is all-or-nothing: the first source that fails to fetch or
//! decode fails the whole ingestion, and the error names that source.

use futures::future::try_join_all;
use par_common::config::SourceConfig;
use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::sheet_client::{decode_csv, SheetError, SheetFetcher};
use crate::models::Record;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// One source could not be fetched or decoded
    #[error("Source {source_tag} failed: {error}")]
    Source {
        source_tag: String,
        #[source]
        error: SheetError,
    },
}

impl IngestError {
    /// Tag of the source that failed
    pub fn source_tag(&self) -> &str {
        match self {
            IngestError::Source { source_tag, .. } => source_tag,
        }
    }
}

/// Fetches and merges records from all configured sources
pub struct RecordIngestor {
    fetcher: Arc<dyn SheetFetcher>,
    sources: Vec<SourceConfig>,
}

impl RecordIngestor {
    pub fn new(fetcher: Arc<dyn SheetFetcher>, sources: Vec<SourceConfig>) -> Self {
        Self { fetcher, sources }
    }

    /// Configured sources, in merge order
    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    /// Fetch all sources concurrently and merge them
    ///
    /// Every call re-fetches every source; nothing is cached.
    pub async fn ingest(&self) -> Result<Vec<Record>, IngestError> {
        let start = Instant::now();

        let per_source = try_join_all(
            self.sources
                .iter()
                .map(|source| fetch_source(self.fetcher.as_ref(), source)),
        )
        .await
        .map_err(|e| {
            warn!(source = %e.source_tag(), error = %e, "Ingestion failed");
            e
        })?;

        let records = merge_sources(per_source);

        info!(
            sources = self.sources.len(),
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Ingestion complete"
        );

        Ok(records)
    }
}

/// Fetch, decode and project one source
async fn fetch_source(
    fetcher: &dyn SheetFetcher,
    source: &SourceConfig,
) -> Result<Vec<Record>, IngestError> {
    let to_error = |error| IngestError::Source {
        source_tag: source.tag.clone(),
        error,
    };

    let bytes = fetcher.fetch(source).await.map_err(to_error)?;
    let rows = decode_csv(&bytes).map_err(to_error)?;

    debug!(source = %source.tag, rows = rows.len(), "Decoded sheet");

    Ok(rows
        .iter()
        .map(|row| Record::from_row(&source.tag, row))
        .collect())
}

/// Concatenate per-source records and order them newest first
pub fn merge_sources(per_source: Vec<Vec<Record>>) -> Vec<Record> {
    let mut merged: Vec<Record> = per_source.into_iter().flatten().collect();
    sort_newest_first(&mut merged);
    merged
}

/// Stable descending sort by parsed date
///
/// Unparsable dates compare equal to each other and below every real date.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by_cached_key(|record| Reverse(record.parsed_date()));
}
