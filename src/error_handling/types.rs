//! Error type definitions.
//!
//! This module defines the error types for each layer of the service and the
//! event types counted by `ServiceStats`.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{EnumIter as EnumIterMacro, IntoStaticStr};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the logger with custom message (e.g., file creation).
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back into a ticket.
    #[error("Corrupt ticket row {ticket_id}: {reason}")]
    CorruptRow { ticket_id: String, reason: String },
}

/// Error types for ticket email delivery.
#[derive(Error, Debug)]
pub enum MailError {
    /// Sender address or password missing.
    #[error("Email credentials not configured")]
    NotConfigured,

    /// Sender or recipient address could not be parsed.
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// A MIME content type could not be parsed.
    #[error("Invalid content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    /// The message could not be assembled.
    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP connection, authentication or delivery failure.
    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Error types for QR code rendering.
#[derive(Error, Debug)]
pub enum QrError {
    /// Payload does not fit any QR version at the chosen error-correction level.
    #[error("QR encoding error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// PNG encoding failed.
    #[error("QR image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Error types for health probes.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The request did not complete (connection refused, timeout, ...).
    #[error("Health request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The endpoint answered with a non-success status.
    #[error("Health endpoint returned HTTP {0}")]
    Status(u16),

    /// The endpoint answered 2xx but did not report itself healthy.
    #[error("Health endpoint reported status '{0}'")]
    Unhealthy(String),
}

/// Events counted by the service and exposed on `/status` and `/metrics`.
///
/// The static string form is the metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    // Registration outcomes
    RegistrationSucceeded,
    RegistrationRejected, // 400: missing or malformed input
    RegistrationFailed,   // 500: storage or QR failure
    EmailFailed,
    // Validation outcomes
    TicketValidated,
    TicketAlreadyUsed,
    TicketNotFound,
    ValidationFailed,
}

impl EventType {
    /// Metric label for this event.
    pub fn label(self) -> &'static str {
        self.into()
    }
}
