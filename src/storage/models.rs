// storage/models.rs
// Database models and row mapping

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error_handling::DatabaseError;
use crate::ticket::Ticket;

/// Columns selected whenever a full ticket is read.
pub(crate) const TICKET_COLUMNS: &str =
    "ticket_id, name, email, scanned, created_at_ms, scanned_at_ms";

/// Result of attempting to mark a ticket as scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// This call performed the scan; the ticket is returned in its new state.
    Scanned(Ticket),
    /// The ticket had been scanned before; returned unchanged.
    AlreadyScanned(Ticket),
    /// No ticket with that id exists.
    NotFound,
}

/// Ticket totals for the status endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TicketCounts {
    pub total: i64,
    pub scanned: i64,
}

/// Maps a `tickets` row (selected with `TICKET_COLUMNS`) to a `Ticket`.
///
/// # Database Schema
///
/// Timestamps are stored as milliseconds since the Unix epoch and `scanned`
/// as 0/1.
pub(crate) fn ticket_from_row(row: &SqliteRow) -> Result<Ticket, DatabaseError> {
    let ticket_id: String = row.try_get("ticket_id")?;
    let created_at_ms: i64 = row.try_get("created_at_ms")?;
    let scanned_at_ms: Option<i64> = row.try_get("scanned_at_ms")?;

    let created_at = from_millis(&ticket_id, created_at_ms)?;
    let scanned_at = scanned_at_ms
        .map(|ms| from_millis(&ticket_id, ms))
        .transpose()?;

    Ok(Ticket {
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        scanned: row.try_get::<i64, _>("scanned")? != 0,
        created_at,
        scanned_at,
        ticket_id,
    })
}

fn from_millis(ticket_id: &str, ms: i64) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| DatabaseError::CorruptRow {
        ticket_id: ticket_id.to_string(),
        reason: format!("timestamp {ms} out of range"),
    })
}
