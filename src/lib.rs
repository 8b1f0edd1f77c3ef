//! Radio-Browser directory proxy library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod radio;
pub mod status;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
