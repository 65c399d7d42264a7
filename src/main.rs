//! puerta: a prefix-routing reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request                 ┌──────────────────────────────────┐
//!   ───────────────────────────▶  │  http::server (dispatch handler)  │
//!                                  │        │                          │
//!                                  │        ▼                          │
//!                                  │  routing (table + matcher +       │
//!                                  │           target URL builder)     │
//!                                  │        │                          │
//!                                  │        ▼                          │
//!   Client Response                │  forward (outbound client,        │
//!   ◀───────────────────────────  │           header transform)       │ ──▶ Upstream
//!                                  └──────────────────────────────────┘
//!
//!   config watcher ──(parsed ProxyConfig)──▶ atomic route table swap
//! ```
//!
//! Requests are matched against the current route table by longest path
//! prefix, the matched prefix is stripped, and the request is forwarded to
//! the route's upstream target. The route table is replaced atomically when
//! the configuration file changes; in-flight requests keep the snapshot they
//! started with.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use puerta::config::{loader::load_config, watcher::ConfigWatcher};
use puerta::http::HttpServer;
use puerta::lifecycle::Shutdown;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "puerta", about = "Prefix-routing reverse proxy")]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "puerta=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = load_config(&args.config)?;
    let port = config.service_port;

    tracing::info!(
        proxy_name = %config.proxy_name,
        port,
        routes = config.routes.len(),
        "Configuration loaded"
    );
    for route in &config.routes {
        tracing::info!(
            path = %route.path,
            target = %route.target,
            enabled = route.enabled,
            description = route.description.as_deref().unwrap_or(""),
            "Route configured"
        );
    }

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Watch the config file; parsed updates arrive on the channel and are
    // swapped into the route table by the server's reload bridge.
    let (watcher, config_updates) = ConfigWatcher::new(&args.config);
    let _watcher_guard = watcher.run()?;

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
