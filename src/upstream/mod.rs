//! Upstream directory access.
//!
//! # Data Flow
//! ```text
//! radio handler
//!     → client.rs (Forwarder::get_json)
//!     → mirrors.rs (pick one mirror uniformly at random)
//!     → single GET with query params, User-Agent, overall timeout
//!     → 200: decoded JSON / otherwise: error.rs (UpstreamError)
//! ```
//!
//! # Design Decisions
//! - Stateless per call; no cache, no de-duplication of identical queries
//! - One outbound call per invocation; optional single failover to a
//!   different mirror on transport failure, off by default
//! - Timeouts are distinct from other transport failures

pub mod client;
pub mod error;
pub mod mirrors;

pub use client::Forwarder;
pub use error::UpstreamError;
pub use mirrors::{Mirror, MirrorPool};
