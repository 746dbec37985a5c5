//! Ticket persistence.
//!
//! All writes are single statements, so a ticket can only ever be scanned
//! once even under concurrent validation requests.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use super::models::{ticket_from_row, ScanOutcome, TicketCounts, TICKET_COLUMNS};
use crate::error_handling::DatabaseError;
use crate::ticket::Ticket;

/// Inserts a newly issued ticket.
pub async fn insert_ticket(pool: &SqlitePool, ticket: &Ticket) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO tickets (ticket_id, name, email, scanned, created_at_ms, scanned_at_ms)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&ticket.ticket_id)
    .bind(&ticket.name)
    .bind(&ticket.email)
    .bind(ticket.scanned as i64)
    .bind(ticket.created_at.timestamp_millis())
    .bind(ticket.scanned_at.map(|t| t.timestamp_millis()))
    .execute(pool)
    .await?;
    Ok(())
}

/// Looks up a ticket by id.
pub async fn get_ticket(
    pool: &SqlitePool,
    ticket_id: &str,
) -> Result<Option<Ticket>, DatabaseError> {
    let row = sqlx::query(&format!(
        "SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = ?"
    ))
    .bind(ticket_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(ticket_from_row).transpose()
}

/// Marks a ticket as scanned at `at`, unless it was scanned before.
///
/// The conditional `UPDATE ... WHERE scanned = 0` decides the race: of two
/// concurrent calls for the same ticket exactly one gets `Scanned`.
pub async fn mark_ticket_scanned(
    pool: &SqlitePool,
    ticket_id: &str,
    at: DateTime<Utc>,
) -> Result<ScanOutcome, DatabaseError> {
    let updated = sqlx::query(&format!(
        "UPDATE tickets SET scanned = 1, scanned_at_ms = ?
         WHERE ticket_id = ? AND scanned = 0
         RETURNING {TICKET_COLUMNS}"
    ))
    .bind(at.timestamp_millis())
    .bind(ticket_id)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = updated {
        return Ok(ScanOutcome::Scanned(ticket_from_row(&row)?));
    }

    match get_ticket(pool, ticket_id).await? {
        Some(ticket) => Ok(ScanOutcome::AlreadyScanned(ticket)),
        None => Ok(ScanOutcome::NotFound),
    }
}

/// Deletes a ticket. Returns whether a row was removed.
pub async fn delete_ticket(pool: &SqlitePool, ticket_id: &str) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM tickets WHERE ticket_id = ?")
        .bind(ticket_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Counts issued and scanned tickets.
pub async fn count_tickets(pool: &SqlitePool) -> Result<TicketCounts, DatabaseError> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS total, COALESCE(SUM(scanned), 0) AS scanned FROM tickets",
    )
    .fetch_one(pool)
    .await?;

    Ok(TicketCounts {
        total: row.try_get("total")?,
        scanned: row.try_get("scanned")?,
    })
}
