//! Shared state and JSON bodies for the HTTP server.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error_handling::ServiceStats;
use crate::mail::TicketMailer;
use crate::storage::TicketCounts;

/// Shared state for all handlers.
///
/// `db` is `None` when storage failed to initialize; the server then runs
/// degraded instead of refusing to start.
#[derive(Clone)]
pub struct AppState {
    pub db: Option<SqlitePool>,
    pub mailer: Arc<dyn TicketMailer>,
    pub stats: Arc<ServiceStats>,
    pub base_url: Arc<str>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: Option<SqlitePool>, mailer: Arc<dyn TicketMailer>, base_url: &str) -> Self {
        Self {
            db,
            mailer,
            stats: Arc::new(ServiceStats::new()),
            base_url: Arc::from(base_url),
            start_time: Instant::now(),
        }
    }
}

/// `201` body for a successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub ticket_id: String,
}

/// Error body for JSON endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub uptime_seconds: f64,
    pub database_connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<TicketCounts>,
    pub events: BTreeMap<&'static str, usize>,
}
