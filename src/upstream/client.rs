//! The forwarder: one outbound GET per call against a random mirror.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::error::UpstreamError;
use crate::upstream::mirrors::{Mirror, MirrorPool};

/// Shared handle for calls to the directory mirrors.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    mirrors: MirrorPool,
    failover: bool,
}

impl Forwarder {
    /// Build the HTTP client and mirror pool from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        let mirrors = MirrorPool::from_config(config)?;

        Ok(Self::with_client(client, mirrors, config.failover))
    }

    /// Assemble a forwarder from an existing client.
    pub fn with_client(client: reqwest::Client, mirrors: MirrorPool, failover: bool) -> Self {
        Self {
            client,
            mirrors,
            failover,
        }
    }

    pub fn mirrors(&self) -> &MirrorPool {
        &self.mirrors
    }

    /// GET `segments` with `params` from a random mirror and decode the body.
    pub async fn get_json<T>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let mirror = self.mirrors.pick();
        match self.fetch(mirror, segments, params).await {
            Err(e) if self.failover && e.is_transport() => {
                let Some(alternate) = self.mirrors.pick_other(mirror) else {
                    return Err(e);
                };
                tracing::warn!(
                    failed = %mirror.label(),
                    alternate = %alternate.label(),
                    error = %e,
                    "Mirror failed, trying another"
                );
                self.fetch(alternate, segments, params).await
            }
            result => result,
        }
    }

    async fn fetch<T>(
        &self,
        mirror: &Mirror,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let url = mirror.endpoint(segments);
        let label = mirror.label();

        let result = self.send(url.clone(), params).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        };
        metrics::record_upstream_request(&label, outcome, start);
        tracing::debug!(
            mirror = %label,
            path = %url.path(),
            outcome,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream request finished"
        );

        result
    }

    async fn send<T>(&self, url: url::Url, params: &[(&str, String)]) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}
