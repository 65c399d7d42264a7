//! Target URL construction.

use crate::routing::table::Route;

/// Build the fully-qualified upstream URL for a matched route.
///
/// The matched prefix is stripped from the request path; the remainder is
/// given a leading `/` unless it is empty or already has one, then appended
/// to `route.target` verbatim, followed by the original query string.
///
/// `route.target` is concatenated as configured, not URL-joined: a target
/// with its own trailing path segment gets simple concatenation semantics.
pub fn build_target_url(route: &Route, path: &str, query: Option<&str>) -> String {
    let remainder = &path[route.path.len()..];

    let separator = if remainder.is_empty() || remainder.starts_with('/') {
        ""
    } else {
        "/"
    };

    match query {
        // A bare trailing `?` parses as an empty query; drop it.
        Some(q) if !q.is_empty() => format!("{}{}{}?{}", route.target, separator, remainder, q),
        _ => format!("{}{}{}", route.target, separator, remainder),
    }
}
