//! Common error types for the PAR analyser

use thiserror::Error;

/// Common result type for PAR operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across PAR services
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
