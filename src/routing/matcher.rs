//! Route matching logic.
//!
//! # Responsibilities
//! - Select the single best-matching enabled route for a request path
//! - Longest prefix wins; equal lengths keep configuration order
//!
//! # Design Decisions
//! - Matching is a literal, case-sensitive string-prefix comparison with
//!   no path-segment awareness: `/ab` matches `/abcdef`. This mirrors the
//!   configured contract and is documented rather than "fixed".
//! - The snapshot is pre-sorted, so the first prefix hit is the answer.

use crate::routing::table::{Route, RouteSet};

/// Find the best-matching enabled route for `path`, or `None`.
///
/// An empty path never matches a (non-empty) route prefix.
pub fn match_route<'a>(set: &'a RouteSet, path: &str) -> Option<&'a Route> {
    set.routes()
        .iter()
        .filter(|route| route.enabled)
        .find(|route| path.starts_with(&route.path))
}
