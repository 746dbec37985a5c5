//! `GET /validate/{ticket_id}`: the URL encoded in every QR code.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use log::{error, info, warn};

use crate::error_handling::EventType;
use crate::pages::{
    already_used_page, database_error_page, invalid_ticket_page, valid_ticket_page,
    validation_error_page,
};
use crate::server::types::AppState;
use crate::storage::{mark_ticket_scanned, ScanOutcome};

/// Admits a ticket holder once.
pub async fn validate_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Response {
    let Some(db) = &state.db else {
        state.stats.increment(EventType::ValidationFailed);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(database_error_page()),
        )
            .into_response();
    };

    let now = Utc::now();
    match mark_ticket_scanned(db, &ticket_id, now).await {
        Ok(ScanOutcome::Scanned(ticket)) => {
            info!("Ticket {} admitted ({})", ticket.ticket_id, ticket.email);
            state.stats.increment(EventType::TicketValidated);
            Html(valid_ticket_page(&ticket, now)).into_response()
        }
        Ok(ScanOutcome::AlreadyScanned(ticket)) => {
            warn!("Ticket {} presented again", ticket.ticket_id);
            state.stats.increment(EventType::TicketAlreadyUsed);
            Html(already_used_page(&ticket)).into_response()
        }
        Ok(ScanOutcome::NotFound) => {
            state.stats.increment(EventType::TicketNotFound);
            (StatusCode::NOT_FOUND, Html(invalid_ticket_page())).into_response()
        }
        Err(e) => {
            error!("Validation error for ticket {ticket_id}: {e}");
            state.stats.increment(EventType::ValidationFailed);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(validation_error_page()),
            )
                .into_response()
        }
    }
}
