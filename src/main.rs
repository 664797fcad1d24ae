//! Chartshare server: publishes year activity charts under short public links.
//!
//! Main entry point that wires all crates together and starts the server.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt};

use chartshare_core::config::{AppConfig, DatabaseConfig, LoggingConfig};
use chartshare_core::error::AppError;
use chartshare_database::DatabasePool;
use chartshare_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("CHARTSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Chartshare v{}", env!("CARGO_PKG_VERSION"));

    create_data_directory(&config.database).await?;

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    chartshare_api::run_server(config, db).await
}

/// Creates the directory holding the SQLite file, if the URL names one.
async fn create_data_directory(config: &DatabaseConfig) -> Result<(), AppError> {
    let file = config
        .url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let file = file.split('?').next().unwrap_or_default();
    if file.is_empty() || file.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(dir) = Path::new(file).parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::internal(format!("Failed to create dir '{}': {e}", dir.display()))
        })?;
    }
    Ok(())
}
