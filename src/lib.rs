//! Prefix-routing reverse proxy library.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod routing;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
