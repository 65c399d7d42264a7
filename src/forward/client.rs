//! Outbound HTTP client for forwarding matched requests.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::schema::ForwardingConfig;
use crate::forward::headers::build_upstream_headers;

/// A complete upstream response, buffered before relay.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Why a forwarding attempt failed. The `Display` text feeds the 502 body.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("invalid target URL {url:?}: {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    /// Connection refused, DNS failure, or protocol error from the client.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("error reading upstream response: {0}")]
    ReadBody(#[source] hyper::Error),

    #[error("upstream did not respond within {} ms", .0.as_millis())]
    Timeout(Duration),
}

/// Forwards one inbound request to one upstream target.
///
/// The transport (plaintext or TLS) is picked from the target URL scheme;
/// default ports 80/443 follow the scheme. Pooling is disabled so every
/// inbound request opens and closes exactly one outbound connection.
pub struct Forwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    timeout: Duration,
    body_methods: HashSet<Method>,
}

impl Forwarder {
    /// Build a forwarder from the forwarding configuration.
    ///
    /// Fails only if the native TLS root store cannot be loaded.
    pub fn new(config: &ForwardingConfig) -> std::io::Result<Self> {
        let https = HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(https);

        // Invalid method names are rejected by config validation; parse
        // failures here simply leave the method out of the set.
        let body_methods = config
            .body_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();

        Ok(Self {
            client,
            timeout: Duration::from_millis(config.timeout_ms),
            body_methods,
        })
    }

    /// Forward `request` to `target_url` and buffer the full response.
    ///
    /// The inbound body is streamed through only for the configured
    /// body-bearing methods; all other methods send an empty body. The
    /// whole call runs under the configured timeout, and a timed-out call
    /// is dropped together with its connection.
    pub async fn forward(
        &self,
        request: Request<Body>,
        target_url: &str,
        peer: SocketAddr,
        inbound_tls: bool,
    ) -> Result<UpstreamResponse, ForwardError> {
        let uri: Uri = target_url.parse().map_err(|source| ForwardError::InvalidTarget {
            url: target_url.to_string(),
            source,
        })?;

        let (parts, inbound_body) = request.into_parts();

        let body = if self.body_methods.contains(&parts.method) {
            inbound_body
        } else {
            Body::empty()
        };

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = build_upstream_headers(&parts.headers, peer, inbound_tls);

        let call = async {
            let response = self.client.request(outbound).await?;
            let (parts, body) = response.into_parts();
            let bytes = body
                .collect()
                .await
                .map_err(ForwardError::ReadBody)?
                .to_bytes();

            Ok(UpstreamResponse {
                status: parts.status,
                headers: parts.headers,
                body: bytes,
            })
        };

        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ForwardError::Timeout(self.timeout)),
        }
    }

    /// True if the inbound body is relayed for this method.
    pub fn carries_body(&self, method: &Method) -> bool {
        self.body_methods.contains(method)
    }
}
