//! `POST /register`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use log::{error, info, warn};

use crate::error_handling::EventType;
use crate::mail::TicketEmail;
use crate::qr::{generate_qr_png, validation_url};
use crate::server::types::{AppState, ErrorResponse, RegisterResponse};
use crate::storage::{delete_ticket, insert_ticket};
use crate::ticket::{Registration, Ticket};

const REGISTERED_MESSAGE: &str = "Registration successful! Check your email for the QR code.";
const EMAIL_FAILED_MESSAGE: &str = "Failed to send email. Please try again.";
const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Issues a ticket, stores it and emails its QR code.
///
/// A ticket whose email could not be delivered is removed again, so every
/// stored ticket has reached its holder.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Response {
    let Json(registration) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected registration body: {rejection}");
            state.stats.increment(EventType::RegistrationRejected);
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let valid = match registration.validate() {
        Ok(valid) => valid,
        Err(e) => {
            state.stats.increment(EventType::RegistrationRejected);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let ticket = Ticket::issue(valid, Utc::now());

    let qr_png = match generate_qr_png(&validation_url(&state.base_url, &ticket.ticket_id)) {
        Ok(png) => png,
        Err(e) => {
            error!("QR generation failed for ticket {}: {e}", ticket.ticket_id);
            state.stats.increment(EventType::RegistrationFailed);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                REGISTRATION_FAILED_MESSAGE,
            );
        }
    };

    match &state.db {
        Some(db) => {
            if let Err(e) = insert_ticket(db, &ticket).await {
                error!("Failed to store ticket {}: {e}", ticket.ticket_id);
                state.stats.increment(EventType::RegistrationFailed);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    REGISTRATION_FAILED_MESSAGE,
                );
            }
        }
        None => warn!(
            "Database unavailable; ticket {} will not be persisted",
            ticket.ticket_id
        ),
    }

    let email = TicketEmail {
        name: ticket.name.clone(),
        email: ticket.email.clone(),
        ticket_id: ticket.ticket_id.clone(),
        qr_png,
    };

    if let Err(e) = state.mailer.send_ticket(&email).await {
        error!("Email sending error for ticket {}: {e}", ticket.ticket_id);
        state.stats.increment(EventType::EmailFailed);
        if let Some(db) = &state.db {
            if let Err(rollback) = delete_ticket(db, &ticket.ticket_id).await {
                error!(
                    "Failed to remove undelivered ticket {}: {rollback}",
                    ticket.ticket_id
                );
            }
        }
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, EMAIL_FAILED_MESSAGE);
    }

    info!("Registered ticket {} for {}", ticket.ticket_id, ticket.email);
    state.stats.increment(EventType::RegistrationSucceeded);
    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: REGISTERED_MESSAGE,
            ticket_id: ticket.ticket_id,
        }),
    )
        .into_response()
}
