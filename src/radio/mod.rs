//! Radio directory subsystem.
//!
//! # Data Flow
//! ```text
//! http handler
//!     → query.rs (bounds: limit 1..=100, offset >= 0; before any upstream call)
//!     → directory.rs (endpoint params, one forwarder call)
//!     → models.rs (reshape by field name, defaults for missing fields)
//! ```
//!
//! Ordering and popularity are delegated to the directory through its
//! `order`/`reverse` parameters; nothing is ranked locally.

pub mod directory;
pub mod models;
pub mod query;

pub use directory::RadioDirectory;
pub use models::{ClickOutcome, Country, Genre, Station};
pub use query::{LimitParams, QueryError, SearchParams, SearchQuery};
