//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use radio_proxy::config::ProxyConfig;
use radio_proxy::lifecycle::{build_server, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A proxy running on an ephemeral port.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api{}", self.addr, path)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config pointing every mirror at the given base URLs.
pub fn config_with_mirrors(mirrors: Vec<String>) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.mirrors = mirrors;
    config.upstream.timeout_secs = 1;
    config
}

/// Start the proxy and wait until it accepts connections.
pub async fn start_proxy(config: ProxyConfig) -> TestProxy {
    let server = build_server(config).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    TestProxy {
        addr,
        client,
        shutdown,
    }
}

/// Base URL of a port nothing listens on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Upstream-shaped station document with extra fields the proxy must drop.
#[allow(dead_code)]
pub fn station(i: usize) -> Value {
    json!({
        "changeuuid": format!("change-{i}"),
        "stationuuid": format!("9617a958-0601-11e8-ae97-{:012}", i),
        "serveruuid": null,
        "name": format!("Station {i}"),
        "url": format!("http://stream.example/{i}"),
        "url_resolved": format!("http://stream.example/{i}.mp3"),
        "homepage": "https://radio.example",
        "favicon": "",
        "tags": "jazz,news",
        "country": "Germany",
        "countrycode": "DE",
        "iso_3166_2": null,
        "state": "",
        "language": "german",
        "languagecodes": "de",
        "votes": 12,
        "lastchangetime": "2024-01-01 10:00:00",
        "lastchangetime_iso8601": "2024-01-01T10:00:00Z",
        "codec": "MP3",
        "bitrate": 128,
        "hls": 0,
        "lastcheckok": 1,
        "clickcount": 1000 - i,
        "clicktrend": 3,
        "ssl_error": 0,
        "geo_lat": 52.52,
        "geo_long": 13.40,
        "has_extended_info": false
    })
}
