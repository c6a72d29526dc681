//! Bootstrap configuration loading and config file resolution
//!
//! Configuration file priority:
//! 1. Command-line argument (highest priority)
//! 2. `PAR_CONFIG` environment variable
//! 3. User config directory (`<config dir>/par-analyser/config.toml`)
//! 4. Built-in defaults (fallback)
//!
//! A missing configuration file never prevents startup; an explicitly
//! requested file that cannot be read or parsed does.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PAR_CONFIG";

/// Default HTTP port for par-analyser
pub const DEFAULT_PORT: u16 = 5780;

/// Default summarization endpoint (OpenAI-compatible chat completions)
pub const DEFAULT_SUMMARIZER_BASE_URL: &str = "https://ark.ap-southeast.volces.com/api/v3";

/// Default summarization model
pub const DEFAULT_SUMMARIZER_MODEL: &str = "deepseek-v3";

/// Company PAR sheets, in merge order
const DEFAULT_SOURCES: [(&str, &str); 5] = [
    ("ALPHA", "https://docs.google.com/spreadsheets/d/1MfKz366shlm9TgaNz3H-LLSVp9GJxuYJsSFhDx5mpic/export?format=csv&gid=1921491470"),
    ("BRAVO", "https://docs.google.com/spreadsheets/d/1Ltj1zXeIpheSbJwYzqiuvyHiJHp3ksDP6X0sLR1ikl4/export?format=csv&gid=1921491470"),
    ("CHARLIE", "https://docs.google.com/spreadsheets/d/1tBvAlu1Fkyf5j8HZgvFbqSJ4CnAeeHspdRNNvqqGUJQ/export?format=csv&gid=1921491470"),
    ("SUPPORT", "https://docs.google.com/spreadsheets/d/1T8KrDYRM1nGBovTHpK-kNFLkZFkMsBhhedpRRlg35-w/export?format=csv&gid=1921491470"),
    ("MSC", "https://docs.google.com/spreadsheets/d/1UwoKYS6UxFHpRaCNJJkN6x7x8soTnbR7iDfImad8NmY/export?format=csv&gid=1921491470"),
];

/// Bootstrap configuration loaded from TOML file
///
/// Read once at startup. The service must restart to pick up changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Named tabular sources, in merge order
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,

    /// Summarization service settings (optional)
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            logging: LoggingConfig::default(),
            sources: default_sources(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One named tabular source (e.g. a company's PAR sheet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source tag attached to every record from this source
    pub tag: String,
    /// CSV export URL
    pub url: String,
}

/// Summarization service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (environment variables take precedence)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_SUMMARIZER_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_SUMMARIZER_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Built-in source registry
pub fn default_sources() -> Vec<SourceConfig> {
    DEFAULT_SOURCES
        .iter()
        .map(|(tag, url)| SourceConfig {
            tag: tag.to_string(),
            url: url.to_string(),
        })
        .collect()
}

/// Default per-user config file path, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("par-analyser").join("config.toml"))
}

/// Resolve which config file to load
///
/// Returns the path and whether it was explicitly requested (CLI or ENV).
/// Explicit paths are returned even if they do not exist so that the
/// loader can report the error.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<(PathBuf, bool)> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some((path.to_path_buf(), true));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some((PathBuf::from(path), true));
        }
    }

    // Priority 3: User config directory (only if present)
    default_config_path()
        .filter(|p| p.exists())
        .map(|p| (p, false))
}

/// Load bootstrap configuration
///
/// Falls back to built-in defaults when no config file is found.
pub fn load_toml_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(cli_arg) {
        Some((path, explicit)) => match read_toml_config(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if explicit => Err(e),
            Err(e) => {
                warn!("{}; using built-in defaults", e);
                Ok(TomlConfig::default())
            }
        },
        None => {
            warn!("No configuration file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    validate_sources(&config.sources)?;
    Ok(config)
}

/// Reject empty or duplicate source tags
fn validate_sources(sources: &[SourceConfig]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for source in sources {
        if source.tag.trim().is_empty() {
            return Err(Error::Config("Source tag cannot be empty".to_string()));
        }
        if !seen.insert(source.tag.as_str()) {
            return Err(Error::Config(format!("Duplicate source tag: {}", source.tag)));
        }
    }
    Ok(())
}
