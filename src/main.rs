//! ramkv - An in-memory key-value store with TTL expiry
//!
//! Stores arbitrary JSON documents, accounts for their canonical encoded
//! size, and reclaims expired entries on demand.

mod api;
mod checkout;
mod config;
mod error;
mod models;
mod report;
mod store;
mod tasks;

use std::net::SocketAddr;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_reclaim_task;

/// Main entry point for the ramkv server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the store, cart, and order log
/// 4. Optionally start the background reclaim task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ramkv=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ramkv server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: ttl={}s, port={}, reclaim_interval={}s",
        config.ttl_secs, config.server_port, config.reclaim_interval
    );

    // Create application state with the store, cart, and order log
    let state = AppState::from_config(&config);
    info!("Store initialized");

    // Start the background reclaim task only when configured; by default
    // reclamation is client-triggered via POST /reclaim
    let reclaim_handle = if config.reclaim_interval > 0 {
        let handle = spawn_reclaim_task(
            state.store.clone(),
            config.reclaim_interval,
            config.ttl_secs,
        );
        info!("Background reclaim task started");
        Some(handle)
    } else {
        info!("Background reclaim task disabled, reclamation is client-triggered");
        None
    };

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reclaim_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the reclaim task if one is running and
/// allows graceful shutdown.
async fn shutdown_signal(reclaim_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the reclaim task if one was spawned
    if let Some(handle) = reclaim_handle {
        handle.abort();
        warn!("Reclaim task aborted");
    }
}
