//! Tabular sheet client
//!
//! Fetches the CSV export of one PAR sheet and decodes it into header-keyed
//! rows. The first row is the header; values are kept as text.

use async_trait::async_trait;
use par_common::config::SourceConfig;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("par-analyser/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT_SECS: u64 = 30;

/// One decoded sheet row, keyed by column header
pub type SheetRow = HashMap<String, String>;

/// Sheet fetch/decode errors
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Decode error: {0}")]
    DecodeError(String),
}

/// Source of raw tabular text
///
/// Implemented over HTTP for production and by in-memory fakes in tests.
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    /// Fetch the raw CSV bytes for one source
    async fn fetch(&self, source: &SourceConfig) -> Result<Vec<u8>, SheetError>;
}

/// Fetches CSV exports over HTTP
pub struct HttpSheetFetcher {
    http_client: reqwest::Client,
}

impl HttpSheetFetcher {
    pub fn new() -> Result<Self, SheetError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| SheetError::NetworkError(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl SheetFetcher for HttpSheetFetcher {
    async fn fetch(&self, source: &SourceConfig) -> Result<Vec<u8>, SheetError> {
        tracing::debug!(source = %source.tag, url = %source.url, "Fetching sheet");

        let response = self
            .http_client
            .get(&source.url)
            .send()
            .await
            .map_err(|e| SheetError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SheetError::NetworkError(e.to_string()))?;

        Ok(body.to_vec())
    }
}

/// Decode CSV bytes into header-keyed rows
///
/// Ragged rows are accepted: missing trailing cells are simply absent from
/// the row map and extra cells are dropped. Blank lines are skipped.
/// A repeated header keeps the cell of its first column.
pub fn decode_csv(bytes: &[u8]) -> Result<Vec<SheetRow>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| SheetError::DecodeError(e.to_string()))?
        .clone();

    reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| SheetError::DecodeError(e.to_string()))?;
            Ok(headers.iter().zip(record.iter()).fold(
                SheetRow::new(),
                |mut row, (header, value)| {
                    row.entry(header.to_string())
                        .or_insert_with(|| value.to_string());
                    row
                },
            ))
        })
        .collect()
}
