//! Bookstore Server - Book Catalog Service
//!
//! A small REST JSON API over a pluggable, in-memory book store.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstore_server::{
    api,
    config::AppConfig,
    server::HttpServer,
    store::StoreRegistry,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bookstore_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bookstore Server v{}", env!("CARGO_PKG_VERSION"));

    // Select the store backend by name; an unregistered name aborts startup
    let registry = StoreRegistry::with_defaults();
    let store = registry
        .build(&config.store.backend)
        .context("failed to select store backend")?;

    tracing::info!("Using {:?} store backend", config.store.backend);

    // Save server address before moving config
    let addr = SocketAddr::new(
        config.server.host.parse().context("invalid host address")?,
        config.server.port,
    );
    let shutdown_deadline = Duration::from_secs(config.server.shutdown_deadline_secs);

    // Create application state and router
    let state = AppState {
        config: Arc::new(config),
        store,
    };
    let app = api::router(state);

    // Two-phase start: bind/serve failures inside the grace window land here
    let mut handle = HttpServer::new(addr, app)
        .start()
        .await
        .context("web server start failed")?;

    tracing::info!("web server start success");

    tokio::select! {
        err = handle.serve_error() => {
            match err {
                Some(err) => anyhow::bail!("web server run failed: {err}"),
                None => anyhow::bail!("web server stopped unexpectedly"),
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("bookstore program is exiting...");
            handle
                .shutdown(shutdown_deadline)
                .await
                .context("bookstore program exit error")?;
        }
    }

    tracing::info!("bookstore program exit success");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
