//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check mirror URLs are usable base URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::{ProxyConfig, StorageBackend};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("api.prefix `{0}` must start with '/' and must not end with '/'")]
    Prefix(String),

    #[error("upstream.mirrors must not be empty")]
    NoMirrors,

    #[error("upstream mirror `{mirror}` is invalid: {reason}")]
    Mirror { mirror: String, reason: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("storage.path is required for the file backend")]
    MissingStoragePath,

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let prefix = &config.api.prefix;
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::Prefix(prefix.clone()));
    }

    if config.upstream.mirrors.is_empty() {
        errors.push(ValidationError::NoMirrors);
    }
    for mirror in &config.upstream.mirrors {
        if let Err(reason) = check_mirror(mirror) {
            errors.push(ValidationError::Mirror {
                mirror: mirror.clone(),
                reason,
            });
        }
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.storage.list_limit == 0 {
        errors.push(ValidationError::Zero("storage.list_limit"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if config.storage.backend == StorageBackend::File
        && config.storage.path.as_deref().map_or(true, str::is_empty)
    {
        errors.push(ValidationError::MissingStoragePath);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_mirror(mirror: &str) -> Result<(), String> {
    let url = Url::parse(mirror).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme `{}`", other)),
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err("not a base URL".to_string());
    }
    if url.query().is_some() {
        return Err("must not carry a query string".to_string());
    }
    Ok(())
}
