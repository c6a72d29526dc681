//! Configuration resolution for par-analyser
//!
//! Provides multi-tier summarizer API key resolution with
//! ENV (service-specific) → ENV (provider) → TOML priority.

use par_common::config::TomlConfig;
use tracing::{info, warn};

/// Service-specific API key variable
pub const API_KEY_ENV_VAR: &str = "PAR_SUMMARIZER_API_KEY";

/// Provider-wide API key variable
pub const PROVIDER_API_KEY_ENV_VAR: &str = "DEEPSEEK_API_KEY";

/// Resolve the summarizer API key
///
/// **Priority:** `PAR_SUMMARIZER_API_KEY` → `DEEPSEEK_API_KEY` → TOML
///
/// A missing key is not fatal; feedback generation reports it when used.
pub fn resolve_summarizer_api_key(toml_config: &TomlConfig) -> Option<String> {
    let candidates = [
        ("environment (PAR_SUMMARIZER_API_KEY)", std::env::var(API_KEY_ENV_VAR).ok()),
        ("environment (DEEPSEEK_API_KEY)", std::env::var(PROVIDER_API_KEY_ENV_VAR).ok()),
        ("TOML", toml_config.summarizer.api_key.clone()),
    ];

    let valid: Vec<(&str, String)> = candidates
        .into_iter()
        .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (source, k)))
        .collect();

    // Warn if multiple sources (potential misconfiguration)
    if valid.len() > 1 {
        let names: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "Summarizer API key found in multiple sources: {}. Using {} (highest priority).",
            names.join(", "),
            names[0]
        );
    }

    match valid.into_iter().next() {
        Some((source, key)) => {
            info!("Summarizer API key loaded from {}", source);
            Some(key.trim().to_string())
        }
        None => {
            warn!(
                "Summarizer API key not configured. Feedback generation is disabled until one of:\n\
                 1. Environment: {}=your-key-here\n\
                 2. Environment: {}=your-key-here\n\
                 3. TOML config: [summarizer] api_key = \"your-key\"",
                API_KEY_ENV_VAR,
                PROVIDER_API_KEY_ENV_VAR
            );
            None
        }
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("sk-123"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   \t"));
    }
}
