//! HTTP surface: the GitHub webhook endpoint and a health probe.

use std::sync::Arc;

pub mod core;
pub mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::app_state::{AppConfig, AppState},
    error_handler::{AppError, AppResult},
    routes::{github_webhook::github_webhook_route::github_webhook_route, health_route::health},
};

pub const GITHUB_WEBHOOK_PATH: &str = "/github/webhook";
pub const HEALTH_PATH: &str = "/health";

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(GITHUB_WEBHOOK_PATH, post(github_webhook_route))
        .route(HEALTH_PATH, get(health))
        .with_state(state)
}

/// Loads configuration from the environment and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let config = AppConfig::from_env()?;
    let state = Arc::new(AppState::new(&config)?);

    let listener = tokio::net::TcpListener::bind(&config.listen_address)
        .await
        .map_err(AppError::Bind)?;

    info!(address = %config.listen_address, "server running");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}
