//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request + target URL
//!     → headers.rs (strip Host + hop-by-hop, inject X-Forwarded-*)
//!     → client.rs (outbound hyper client, plaintext or TLS by scheme)
//!     → full upstream response buffered
//!     → returned as one UpstreamResponse unit
//! ```
//!
//! # Design Decisions
//! - One outbound connection per inbound request (pooling disabled)
//! - A single configurable timeout covers connect, send and response read;
//!   expiry drops the in-flight call and the connection with it
//! - The upstream response body is buffered in full before anything is
//!   written back to the client, so a mid-response upstream failure turns
//!   into a clean 502 instead of a truncated reply

pub mod client;
pub mod headers;

pub use client::{ForwardError, Forwarder, UpstreamResponse};
