//! Radio-Browser directory proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────────┐
//!                      │                   RADIO PROXY                     │
//!   Client Request     │  ┌─────────┐    ┌───────────┐    ┌─────────────┐  │
//!   ───────────────────┼─▶│  http   │───▶│   radio   │───▶│  upstream   │──┼──▶ random mirror
//!                      │  │ server  │    │ directory │    │  forwarder  │  │    (one GET)
//!                      │  └────┬────┘    └───────────┘    └─────────────┘  │
//!                      │       │                                           │
//!                      │       ▼                                           │
//!                      │  ┌─────────┐                                      │
//!                      │  │ status  │──▶ memory | JSON-lines file          │
//!                      │  │  store  │                                      │
//!                      │  └─────────┘                                      │
//!                      │                                                   │
//!                      │  config · observability · lifecycle               │
//!                      └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use radio_proxy::config::{self, ProxyConfig};
use radio_proxy::lifecycle::{build_server, signals, Shutdown};
use radio_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "radio-proxy")]
#[command(about = "Proxy for the Radio-Browser directory API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "RADIO_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config: ProxyConfig = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::loader::default_config()?,
    };

    logging::init_logging(&config.observability);

    tracing::info!("radio-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        prefix = %config.api.prefix,
        mirrors = ?config.upstream.mirrors,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = build_server(config).await?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
