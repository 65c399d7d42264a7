//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (pin current RouteSet snapshot)
//!     → matcher.rs (longest literal prefix wins)
//!     → target.rs (strip prefix, build upstream URL)
//!
//! Route Compilation (at startup and on reload):
//!     RouteConfig[]
//!     → RouteSet::new (stable sort, longest prefix first)
//!     → Freeze as immutable snapshot
//!     → Atomic swap into RouteTable
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; reload swaps the whole set atomically
//! - Matching is a literal string-prefix comparison, deliberately not
//!   segment-aware (`/ab` matches `/abcdef`)
//! - Deterministic: equal-length prefixes keep configuration order

pub mod matcher;
pub mod table;
pub mod target;

pub use matcher::match_route;
pub use table::{Route, RouteSet, RouteTable};
pub use target::build_target_url;
