//! Catalog Server
//!
//! Product catalog service with swappable storage (in-memory or embedded
//! SQLite), an optional look-aside cache, and JWT-gated mutations.

mod app;
mod cache;
mod config;
mod error;
mod extractors;
mod guard;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use app::{build_router, AppState};
use cache::CacheLayer;
use guard::AuthenticatedGuard;
use services::{AuthService, CatalogService};
use storage::{MemoryStore, ProductStore, SqliteStore};

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = config::load_config();
    info!(
        "Config loaded: bind={}, backend={}",
        config.bind_address,
        if config.database_path.is_some() {
            "sqlite"
        } else {
            "memory"
        }
    );

    // Storage backend: a database path selects SQLite, otherwise the
    // in-memory store. Everything downstream sees the same trait object.
    let store: Arc<dyn ProductStore> = match &config.database_path {
        Some(path) => Arc::new(
            SqliteStore::new(path)
                .await
                .context("Failed to initialize database")?,
        ),
        None => {
            info!("Using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let cache = if config.cache_disabled {
        info!("Cache disabled, reads go straight to storage");
        None
    } else {
        Some(Arc::new(CacheLayer::new()))
    };

    let catalog = Arc::new(CatalogService::new(
        store,
        cache,
        Arc::new(AuthenticatedGuard),
    ));
    let auth = Arc::new(AuthService::new(config.jwt_secret.clone()));

    let shutdown = CancellationToken::new();
    let state = AppState {
        catalog,
        auth,
        shutdown: shutdown.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down...");
                shutdown.cancel();
            }
        })
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
