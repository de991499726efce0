use std::sync::Arc;

use clap::Parser;
use colored::*;
use roster_server::{build_router, config::ServerConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roster_server=debug,tower_http=debug")),
        )
        .init();

    let config = ServerConfig::parse();

    tracing::info!("{}", "Roster Server".bold().cyan());
    tracing::info!("{}", "=============".cyan());

    // Startup failures are fatal: no degraded serving without a store
    let store = match config.connect_store().await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(%e, "Failed to initialize document store");
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(
        AppState::new(store.clone())
            .with_list_failure_policy(config.list_failure_policy)
            .with_validation(config.validate),
    );
    let app = build_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%e, addr = %config.bind, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(
        addr = %config.bind,
        list_failure_policy = %config.list_failure_policy,
        validate = config.validate,
        "Server started"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;

    if let Err(e) = served {
        tracing::error!(%e, addr = %config.bind, "Server error");
        std::process::exit(1);
    }
    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(%e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
