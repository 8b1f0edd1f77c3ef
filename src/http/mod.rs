//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span)
//!     → radio.rs / status.rs (handlers)
//!     → response.rs (error mapping, body shapes)
//!     → Send to client
//! ```

pub mod radio;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use request::X_REQUEST_ID;
pub use response::{ApiError, ClickReceipt};
pub use server::{AppState, HttpServer};
