//! HTTP server setup and per-request dispatch.
//!
//! # Responsibilities
//! - Build the Axum router (every path falls through to the dispatcher)
//! - Wire up middleware (tracing, request ID)
//! - Run the reload bridge: swap the route table when a new config arrives
//! - Dispatch: match route → build target URL → forward → respond

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::forward::Forwarder;
use crate::http::request::RequestIdLayer;
use crate::http::response;
use crate::routing::{build_target_url, match_route, RouteSet, RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
struct AppState {
    table: Arc<RouteTable>,
    forwarder: Arc<Forwarder>,
    proxy_name: Arc<str>,
    /// The listener speaks plaintext; a TLS-terminating listener would set
    /// this, and with it `X-Forwarded-Proto: https`.
    inbound_tls: bool,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    table: Arc<RouteTable>,
    service_port: u16,
}

impl HttpServer {
    /// Create a server from a loaded configuration.
    ///
    /// Fails only if the outbound TLS root store cannot be loaded.
    pub fn new(config: ProxyConfig) -> std::io::Result<Self> {
        let table = Arc::new(RouteTable::new(RouteSet::from_config(config.routes)));
        let forwarder = Arc::new(Forwarder::new(&config.forwarding)?);

        let state = AppState {
            table: table.clone(),
            forwarder,
            proxy_name: config.proxy_name.into(),
            inbound_tls: false,
        };

        // Every path and method falls through to the dispatcher.
        let router = Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router,
            table,
            service_port: config.service_port,
        })
    }

    /// Run the server on `listener` until the shutdown signal fires.
    ///
    /// Configs arriving on `config_updates` have their route set swapped
    /// into the live table atomically; in-flight requests are unaffected.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ProxyConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        // Reload bridge: the watcher already validated the config, so a
        // received update always replaces the table wholesale.
        let table = self.table.clone();
        let bound_port = self.service_port;
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                if new_config.service_port != bound_port {
                    tracing::warn!(
                        new_port = new_config.service_port,
                        "Port changed; restart required to apply"
                    );
                }
                table.replace(RouteSet::from_config(new_config.routes));
            }
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Per-request orchestrator: match, build target URL, forward, respond.
///
/// All failures terminate here as structured JSON responses; nothing
/// propagates far enough to take down the listener, and there are no
/// retries.
async fn dispatch_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();
    let original_target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let query = request.uri().query().map(str::to_string);

    tracing::debug!(
        method = %request.method(),
        target = %original_target,
        peer = %peer,
        "Dispatching request"
    );

    // The snapshot is pinned for the whole dispatch; a concurrent reload
    // does not affect this request.
    let snapshot = state.table.load();
    let Some(route) = match_route(&snapshot, &path) else {
        tracing::warn!(path = %path, "No route matched");
        return response::route_not_found(&original_target, &state.proxy_name);
    };

    let target_url = build_target_url(route, &path, query.as_deref());
    tracing::debug!(
        prefix = %route.path,
        target_url = %target_url,
        "Forwarding to upstream"
    );

    match state
        .forwarder
        .forward(request, &target_url, peer, state.inbound_tls)
        .await
    {
        Ok(upstream) => {
            tracing::debug!(status = %upstream.status, "Upstream responded");
            response::relay_upstream(upstream)
        }
        Err(e) => {
            tracing::error!(error = %e, target_url = %target_url, "Forwarding failed");
            response::bad_gateway(&e)
        }
    }
}
