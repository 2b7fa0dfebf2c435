//! AdCrate Recorder - Main entry point

use adcrate_persistence::Database;
use adcrate_recorder::{build_router, LogNotifier, RecorderConfig, RecorderState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adcrate_recorder=debug,adcrate_persistence=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AdCrate claim recorder");

    let config = RecorderConfig::from_env();
    let db = Database::connect(&config.db_path).await?;
    tracing::info!("Database ready at {}", config.db_path.display());

    let state = RecorderState {
        pool: db.pool().clone(),
        admin_key: Arc::new(config.admin_key.clone()),
        notifier: Arc::new(LogNotifier::new(config.notify_email.clone())),
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Claim recorder listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
