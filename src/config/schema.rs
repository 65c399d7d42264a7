//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the JSON config
//! file. Field names on the wire use the hyphenated form (`service-port`).

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Port the listener binds on (all interfaces).
    #[serde(rename = "service-port")]
    pub service_port: u16,

    /// Display name embedded in route-not-found responses.
    #[serde(rename = "proxy-name")]
    pub proxy_name: String,

    /// Route definitions mapping path prefixes to upstream targets.
    pub routes: Vec<RouteConfig>,

    /// Forwarding behavior (timeout, body-bearing methods).
    pub forwarding: ForwardingConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            service_port: 3000,
            proxy_name: "puerta".to_string(),
            routes: Vec::new(),
            forwarding: ForwardingConfig::default(),
        }
    }
}

/// One configured route: a path prefix mapped to an upstream base URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path prefix to match, compared as a literal string prefix.
    pub path: String,

    /// Upstream base URL (scheme + host + optional port).
    pub target: String,

    /// Disabled routes are invisible to matching.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Free-text description, display only.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// Forwarding behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Total timeout for one outbound call, in milliseconds.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Methods whose inbound body is relayed to the upstream.
    #[serde(rename = "body-methods")]
    pub body_methods: Vec<String>,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            body_methods: vec!["POST".into(), "PUT".into(), "PATCH".into()],
        }
    }
}
