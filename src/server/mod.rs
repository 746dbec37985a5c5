//! HTTP server for ticket registration and validation.
//!
//! Routes:
//! - `GET /` - registration page
//! - `POST /register` - issue a ticket and email its QR code
//! - `GET /validate/{ticket_id}` - one-time entry validation
//! - `GET /health` - container health probe
//! - `GET /status` - JSON status with ticket totals and event counters
//! - `GET /metrics` - Prometheus-compatible metrics

mod handlers;
mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::app::wait_for_shutdown_signal;
use crate::config::{Config, HEALTH_PATH};
use crate::error_handling::DatabaseError;
use crate::mail::SmtpMailer;
use crate::storage::{init_db_pool_with_path, run_migrations};

pub use types::{AppState, ErrorResponse, RegisterResponse, StatusResponse};

/// Builds the router with all routes, request logging and CORS.
///
/// CORS is permissive so the registration form works when served from
/// another origin (for example behind the reverse proxy).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/register", post(handlers::register))
        .route("/validate/{ticket_id}", get(handlers::validate_ticket))
        .route(HEALTH_PATH, get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(handlers::log_requests))
        .with_state(state)
}

/// Opens the ticket database and applies migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, DatabaseError> {
    let pool = init_db_pool_with_path(db_path).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Serves `state` on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

/// Runs the ticketing server until Ctrl-C or SIGTERM.
///
/// Storage failures are not fatal: the server starts degraded, reports
/// `database_connected: false` on `/health`, and refuses validations.
pub async fn run_server(config: Config) -> Result<(), anyhow::Error> {
    config.validate().context("Invalid configuration")?;

    let db = match init_database(&config.db_path).await {
        Ok(pool) => {
            info!("Ticket database ready at {}", config.db_path.display());
            Some(pool)
        }
        Err(e) => {
            warn!(
                "Failed to initialize database at {}: {}. Continuing without ticket storage.",
                config.db_path.display(),
                e
            );
            None
        }
    };

    let mailer = SmtpMailer::from_config(&config).context("Failed to configure SMTP relay")?;
    let state = AppState::new(db.clone(), Arc::new(mailer), &config.base_url);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind server to {}", config.bind_address()))?;

    info!(
        "ESYA ticketing server listening on http://{}/ ({:?})",
        config.bind_address(),
        config.environment
    );
    info!("  - Health: http://{}{}", config.bind_address(), HEALTH_PATH);
    info!("  - QR codes link to {}/validate/<ticket_id>", config.base_url.trim_end_matches('/'));

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("Shutdown signal received, draining connections");
        signal_token.cancel();
    });

    serve(listener, state, shutdown).await?;

    if let Some(pool) = db {
        if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(&pool)
            .await
        {
            warn!(
                "Failed to checkpoint WAL file (this is non-critical): {}",
                e
            );
        }
        pool.close().await;
    }

    info!("Server stopped");
    Ok(())
}
