//! # PAR Common Library
//!
//! Shared code for the PAR analyser services including:
//! - Common error type
//! - Bootstrap configuration loading (TOML)
//! - Lenient date parsing for record ordering

pub mod config;
pub mod error;
pub mod time;

pub use error::{Error, Result};
