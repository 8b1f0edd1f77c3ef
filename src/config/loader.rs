//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{ProxyConfig, StorageBackend};
use crate::config::validation::{validate_config, ValidationError};

/// Overrides the listener bind address.
pub const ENV_BIND: &str = "RADIO_PROXY_BIND";
/// Overrides the log level.
pub const ENV_LOG_LEVEL: &str = "RADIO_PROXY_LOG_LEVEL";
/// Selects file storage at the given path.
pub const ENV_STORAGE_PATH: &str = "RADIO_PROXY_STORAGE_PATH";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text, applying process
/// environment overrides.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    let mut config: ProxyConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Default configuration with environment overrides, validated.
pub fn default_config() -> Result<ProxyConfig, ConfigError> {
    parse_config("")
}

/// Apply `RADIO_PROXY_*` overrides using the given variable lookup.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.is_empty()) {
        config.listener.bind_address = bind;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
        config.observability.log_level = level;
    }
    if let Some(path) = lookup(ENV_STORAGE_PATH).filter(|v| !v.is_empty()) {
        config.storage.backend = StorageBackend::File;
        config.storage.path = Some(path);
    }
}
