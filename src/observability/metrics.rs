//! Metrics collection and exposition.
//!
//! # Metrics
//! - `radio_upstream_requests_total` (counter): upstream calls by mirror, outcome
//! - `radio_upstream_request_duration_seconds` (histogram): upstream latency by mirror
//! - `radio_clicks_total` (counter): click registrations by outcome
//!
//! Recording is a no-op until a recorder is installed, so handlers and tests
//! never need to care whether the exporter is running.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record one upstream call.
pub fn record_upstream_request(mirror: &str, outcome: &'static str, start: Instant) {
    let mirror = mirror.to_string();
    metrics::counter!(
        "radio_upstream_requests_total",
        "mirror" => mirror.clone(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("radio_upstream_request_duration_seconds", "mirror" => mirror)
        .record(start.elapsed().as_secs_f64());
}

/// Record a click registration attempt.
pub fn record_click(registered: bool) {
    let outcome = if registered { "registered" } else { "failed" };
    metrics::counter!("radio_clicks_total", "outcome" => outcome).increment(1);
}
