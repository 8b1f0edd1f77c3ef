//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers under the configured prefix
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::{propagate_request_id, request_span, set_request_id};
use crate::http::{radio, status};
use crate::radio::RadioDirectory;
use crate::status::StatusStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: RadioDirectory,
    pub store: Arc<dyn StatusStore>,
    pub list_limit: usize,
}

/// HTTP server for the radio proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and dependencies.
    pub fn new(config: ProxyConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let prefix = config.api.prefix.as_str();

        let router = Router::new()
            .route(prefix, get(status::root))
            .route(&format!("{prefix}/"), get(status::root))
            .route(&format!("{prefix}/radio/search"), get(radio::search_stations))
            .route(&format!("{prefix}/radio/popular"), get(radio::popular_stations))
            .route(&format!("{prefix}/radio/countries"), get(radio::countries))
            .route(&format!("{prefix}/radio/genres"), get(radio::genres))
            .route(&format!("{prefix}/radio/click/{{station_id}}"), post(radio::click_station))
            .route(&format!("{prefix}/radio/station/{{station_id}}"), get(radio::station_details))
            .route(
                &format!("{prefix}/status"),
                get(status::list_status_checks).post(status::create_status_check),
            )
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        let router = if config.security.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        };

        router.layer(
            ServiceBuilder::new()
                .layer(set_request_id())
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(propagate_request_id()),
        )
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.api.prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
