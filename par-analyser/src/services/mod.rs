//! Service modules for the PAR analysis pipeline
//!
//! Ingestion fetches and merges sheets; the normalizer and pointer parser
//! interpret record text; the filter, prompt builder, summarizer client and
//! aggregator make up the feedback flow.

pub mod conduct_normalizer;
pub mod feedback_aggregator;
pub mod feedback_prompt;
pub mod ingestion;
pub mod pointer_parser;
pub mod record_filter;
pub mod sheet_client;
pub mod summarizer_client;

pub use conduct_normalizer::NormalizationTable;
pub use feedback_aggregator::AggregateError;
pub use ingestion::{IngestError, RecordIngestor};
pub use sheet_client::{HttpSheetFetcher, SheetError, SheetFetcher};
pub use summarizer_client::{ChatCompletionsClient, Summarizer, SummarizerError};
