//! Route table with atomic hot reload.
//!
//! The table holds one immutable [`RouteSet`] snapshot behind an
//! [`ArcSwap`]. Readers load the snapshot once per request and keep it for
//! the whole dispatch, so a concurrent reload can never tear the table
//! under them; the old snapshot is dropped when its last reader finishes.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::RouteConfig;

/// One active route: a path prefix mapped to an upstream base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Literal path prefix (not segment-aware).
    pub path: String,
    /// Upstream base URL, appended to verbatim when building target URLs.
    pub target: String,
    /// Disabled routes never match.
    pub enabled: bool,
    /// Display-only description.
    pub description: Option<String>,
}

impl From<RouteConfig> for Route {
    fn from(config: RouteConfig) -> Self {
        Self {
            path: config.path,
            target: config.target,
            enabled: config.enabled,
            description: config.description,
        }
    }
}

/// An immutable, match-ordered set of routes.
///
/// Routes are ordered longest prefix first at construction so the matcher
/// is a plain linear scan. The sort is stable: routes with equal-length
/// prefixes keep their configuration order, which makes tie-breaking
/// reproducible.
#[derive(Debug, Default)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// Build a snapshot from configured routes.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut routes: Vec<Route> = routes.into_iter().collect();
        routes.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        Self { routes }
    }

    /// Build a snapshot from the config wire shape.
    pub fn from_config(routes: Vec<RouteConfig>) -> Self {
        Self::new(routes.into_iter().map(Route::from))
    }

    /// Routes in match order (longest prefix first).
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Atomically replaceable handle to the current [`RouteSet`].
pub struct RouteTable {
    snapshot: ArcSwap<RouteSet>,
}

impl RouteTable {
    /// Create a table serving the given initial snapshot.
    pub fn new(routes: RouteSet) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(routes),
        }
    }

    /// Pin the current snapshot.
    ///
    /// The returned `Arc` stays valid across reloads; a dispatch that
    /// started on the old table finishes on the old table.
    pub fn load(&self) -> Arc<RouteSet> {
        self.snapshot.load_full()
    }

    /// Replace the whole table in a single atomic pointer swap.
    ///
    /// Readers observe either the entirely-old or entirely-new set, never
    /// a mix.
    pub fn replace(&self, routes: RouteSet) {
        let route_count = routes.len();
        self.snapshot.store(Arc::new(routes));
        tracing::info!(route_count, "Route table replaced");
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RouteSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str, target: &str) -> Route {
        Route {
            path: path.to_string(),
            target: target.to_string(),
            enabled: true,
            description: None,
        }
    }

    #[test]
    fn snapshot_orders_longest_prefix_first() {
        let set = RouteSet::new(vec![
            route("/api", "http://a"),
            route("/api/v2/items", "http://c"),
            route("/api/v2", "http://b"),
        ]);
        let prefixes: Vec<&str> = set.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(prefixes, ["/api/v2/items", "/api/v2", "/api"]);
    }

    #[test]
    fn equal_length_prefixes_keep_config_order() {
        let set = RouteSet::new(vec![
            route("/aa", "http://first"),
            route("/bb", "http://second"),
        ]);
        assert_eq!(set.routes()[0].target, "http://first");
        assert_eq!(set.routes()[1].target, "http://second");
    }

    #[test]
    fn replace_swaps_whole_snapshot() {
        let table = RouteTable::new(RouteSet::new(vec![route("/old", "http://old")]));

        let pinned = table.load();
        table.replace(RouteSet::new(vec![route("/new", "http://new")]));

        // The pinned snapshot still sees the old set.
        assert_eq!(pinned.routes()[0].path, "/old");
        // A fresh load sees the new one.
        assert_eq!(table.load().routes()[0].path, "/new");
    }
}
