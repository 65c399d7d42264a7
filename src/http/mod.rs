//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch handler)
//!     → request.rs (request ID injection)
//!     → [routing decides upstream]
//!     → [forward relays the call]
//!     → response.rs (relay upstream / 404 / 502 JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
