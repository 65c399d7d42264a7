//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (parse, deserialize, semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → routes frozen into a RouteSet snapshot
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and validates new config
//!     → parsed ProxyConfig sent over the update channel
//!     → server swaps the route table atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - All fields have defaults to allow minimal configs
//! - A reload that fails to parse or validate keeps the current config

pub mod loader;
pub mod schema;
pub mod watcher;

pub use loader::ConfigError;
pub use schema::{ForwardingConfig, ProxyConfig, RouteConfig};
