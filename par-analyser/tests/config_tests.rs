//! Unit tests for summarizer API key resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate PAR_SUMMARIZER_API_KEY or DEEPSEEK_API_KEY are
//! marked with #[serial] to ensure they run sequentially, not in parallel.

use par_analyser::config::{
    is_valid_key, resolve_summarizer_api_key, API_KEY_ENV_VAR, PROVIDER_API_KEY_ENV_VAR,
};
use par_common::config::{SummarizerConfig, TomlConfig};
use serial_test::serial;

fn toml_with_key(key: Option<&str>) -> TomlConfig {
    TomlConfig {
        summarizer: SummarizerConfig {
            api_key: key.map(str::to_string),
            ..SummarizerConfig::default()
        },
        ..TomlConfig::default()
    }
}

fn clear_env() {
    std::env::remove_var(API_KEY_ENV_VAR);
    std::env::remove_var(PROVIDER_API_KEY_ENV_VAR);
}

#[test]
#[serial]
fn test_service_env_overrides_provider_env_and_toml() {
    clear_env();
    std::env::set_var(API_KEY_ENV_VAR, "service-key");
    std::env::set_var(PROVIDER_API_KEY_ENV_VAR, "provider-key");

    let key = resolve_summarizer_api_key(&toml_with_key(Some("toml-key")));
    assert_eq!(key.as_deref(), Some("service-key"));

    clear_env();
}

#[test]
#[serial]
fn test_provider_env_overrides_toml() {
    clear_env();
    std::env::set_var(PROVIDER_API_KEY_ENV_VAR, "provider-key");

    let key = resolve_summarizer_api_key(&toml_with_key(Some("toml-key")));
    assert_eq!(key.as_deref(), Some("provider-key"));

    clear_env();
}

#[test]
#[serial]
fn test_toml_fallback() {
    clear_env();

    let key = resolve_summarizer_api_key(&toml_with_key(Some("toml-key")));
    assert_eq!(key.as_deref(), Some("toml-key"));
}

#[test]
#[serial]
fn test_whitespace_env_key_is_skipped() {
    clear_env();
    std::env::set_var(API_KEY_ENV_VAR, "   ");

    let key = resolve_summarizer_api_key(&toml_with_key(Some("toml-key")));
    assert_eq!(key.as_deref(), Some("toml-key"));

    clear_env();
}

#[test]
#[serial]
fn test_no_key_anywhere() {
    clear_env();

    assert!(resolve_summarizer_api_key(&toml_with_key(None)).is_none());
    assert!(resolve_summarizer_api_key(&toml_with_key(Some(""))).is_none());
}

#[test]
#[serial]
fn test_key_is_trimmed() {
    clear_env();
    std::env::set_var(API_KEY_ENV_VAR, "  padded-key\n");

    let key = resolve_summarizer_api_key(&TomlConfig::default());
    assert_eq!(key.as_deref(), Some("padded-key"));

    clear_env();
}

#[test]
fn test_is_valid_key() {
    assert!(is_valid_key("valid-key"));
    assert!(!is_valid_key(""));
    assert!(!is_valid_key("  \n\t"));
}
