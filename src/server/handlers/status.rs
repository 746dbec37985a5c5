//! Health, status and metrics endpoints.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use std::fmt::Write;

use crate::health::HealthReport;
use crate::server::types::{AppState, StatusResponse};
use crate::storage::{count_tickets, TicketCounts};

/// Liveness probe used by the container health check.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "healthy".to_string(),
        database_connected: state.db.is_some(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn ticket_counts(state: &AppState) -> Option<TicketCounts> {
    let db = state.db.as_ref()?;
    match count_tickets(db).await {
        Ok(counts) => Some(counts),
        Err(e) => {
            log::warn!("Failed to count tickets: {e}");
            None
        }
    }
}

/// JSON status endpoint with ticket totals and event counters
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        database_connected: state.db.is_some(),
        tickets: ticket_counts(&state).await,
        events: state
            .stats
            .snapshot()
            .into_iter()
            .map(|(event, count)| (event.label(), count))
            .collect(),
    })
}

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let mut metrics = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        metrics,
        r#"# HELP esya_ticketing_uptime_seconds Seconds since the server started
# TYPE esya_ticketing_uptime_seconds gauge
esya_ticketing_uptime_seconds {}

# HELP esya_ticketing_database_connected Whether ticket storage is available (1) or not (0)
# TYPE esya_ticketing_database_connected gauge
esya_ticketing_database_connected {}

# HELP esya_ticketing_events_total Registration and validation outcomes
# TYPE esya_ticketing_events_total counter
"#,
        state.start_time.elapsed().as_secs_f64(),
        u8::from(state.db.is_some()),
    );
    for (event, count) in state.stats.snapshot() {
        let _ = writeln!(
            metrics,
            "esya_ticketing_events_total{{event=\"{}\"}} {}",
            event.label(),
            count
        );
    }

    if let Some(counts) = ticket_counts(&state).await {
        let _ = write!(
            metrics,
            r#"
# HELP esya_ticketing_tickets Tickets issued
# TYPE esya_ticketing_tickets gauge
esya_ticketing_tickets {}

# HELP esya_ticketing_tickets_scanned Tickets already used for entry
# TYPE esya_ticketing_tickets_scanned gauge
esya_ticketing_tickets_scanned {}
"#,
            counts.total, counts.scanned
        );
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics,
    )
        .into_response()
}
