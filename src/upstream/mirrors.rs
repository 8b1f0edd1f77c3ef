//! Mirror selection.
//!
//! # Responsibilities
//! - Hold the fixed list of equivalent directory mirrors
//! - Pick one uniformly at random per call
//! - Build endpoint URLs with percent-encoded path segments

use rand::seq::SliceRandom;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::error::UpstreamError;

/// One directory mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mirror {
    base_url: Url,
}

impl Mirror {
    /// Parse a mirror base URL (e.g. "https://de1.api.radio-browser.info").
    pub fn parse(base: &str) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base).map_err(|e| UpstreamError::Unavailable {
            message: format!("invalid mirror `{}`: {}", base, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Unavailable {
                message: format!("invalid mirror `{}`: not a base URL", base),
            });
        }
        Ok(Self { base_url })
    }

    /// `host:port` label used in logs and metrics.
    pub fn label(&self) -> String {
        let host = self.base_url.host_str().unwrap_or("unknown");
        match self.base_url.port_or_known_default() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Full URL for the given path segments below the mirror base.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are checked in `parse`, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Fixed set of mirrors with uniform random selection.
#[derive(Debug, Clone)]
pub struct MirrorPool {
    mirrors: Vec<Mirror>,
}

impl MirrorPool {
    /// Build a pool from parsed mirrors. The list must not be empty.
    pub fn new(mirrors: Vec<Mirror>) -> Result<Self, UpstreamError> {
        if mirrors.is_empty() {
            return Err(UpstreamError::Unavailable {
                message: "no upstream mirrors configured".to_string(),
            });
        }
        Ok(Self { mirrors })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mirrors = config
            .mirrors
            .iter()
            .map(|m| Mirror::parse(m))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(mirrors)
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    /// Pick one mirror uniformly at random.
    pub fn pick(&self) -> &Mirror {
        // `new` guarantees at least one mirror.
        self.mirrors
            .choose(&mut rand::thread_rng())
            .unwrap_or(&self.mirrors[0])
    }

    /// Pick uniformly among the mirrors other than `failed`.
    pub fn pick_other(&self, failed: &Mirror) -> Option<&Mirror> {
        let others: Vec<&Mirror> = self.mirrors.iter().filter(|m| *m != failed).collect();
        others.choose(&mut rand::thread_rng()).copied()
    }
}
