//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Open the status store and build the forwarder
//! - Assemble the HTTP server from those explicit dependencies
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners bind last, in `main` (traffic only when ready)

use thiserror::Error;

use crate::config::validation::validate_config;
use crate::config::{ProxyConfig, ValidationError};
use crate::http::{AppState, HttpServer};
use crate::radio::RadioDirectory;
use crate::status::{open_store, StoreError};
use crate::upstream::{Forwarder, UpstreamError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0:?}")]
    Config(Vec<ValidationError>),

    #[error("status store: {0}")]
    Store(#[from] StoreError),

    #[error("upstream client: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Build a ready-to-run server from configuration.
pub async fn build_server(config: ProxyConfig) -> Result<HttpServer, StartupError> {
    validate_config(&config).map_err(StartupError::Config)?;

    let store = open_store(&config.storage).await?;
    let forwarder = Forwarder::new(&config.upstream)?;

    tracing::info!(
        mirrors = forwarder.mirrors().len(),
        timeout_secs = config.upstream.timeout_secs,
        failover = config.upstream.failover,
        storage = ?config.storage.backend,
        "Subsystems initialized"
    );

    let state = AppState {
        directory: RadioDirectory::new(forwarder),
        store,
        list_limit: config.storage.list_limit,
    };

    Ok(HttpServer::new(config, state))
}
