//! Server runner: wires state, router, and background maintenance together.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use chartshare_core::config::AppConfig;
use chartshare_core::error::AppError;
use chartshare_database::DatabasePool;

use crate::router::build_router;
use crate::state::AppState;

/// How often expired sessions are purged.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// Runs the Chartshare server until Ctrl+C.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = AppState::new(config, db)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let purge_handle = tokio::spawn(purge_sessions(state.clone(), shutdown_rx));

    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "Chartshare server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Err(e) = purge_handle.await {
        warn!(error = %e, "Session purge task panicked");
    }
    state.db.close().await;
    info!("Chartshare server stopped");
    Ok(())
}

async fn purge_sessions(state: AppState, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = state.session_service.purge_expired().await {
                    warn!(error = %e, "Failed to purge expired sessions");
                }
            }
            _ = shutdown.changed() => break,
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C, shutting down");
    }
    info!("Shutdown signal received");
}
