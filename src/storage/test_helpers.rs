//! Shared test helpers for storage module tests.

#[cfg(test)]
use chrono::{DateTime, Utc};
#[cfg(test)]
use sqlx::sqlite::SqlitePoolOptions;
#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
use crate::storage::run_migrations;
#[cfg(test)]
use crate::ticket::Ticket;

/// Creates a test database pool with migrations applied.
///
/// Uses a single-connection in-memory database; every connection to
/// `sqlite::memory:` would otherwise see its own empty database.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates an unscanned ticket with a millisecond-precision creation time,
/// so it compares equal after a database round trip.
#[cfg(test)]
pub fn sample_ticket(name: &str, email: &str) -> Ticket {
    let now = Utc::now().timestamp_millis();
    Ticket {
        ticket_id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        scanned: false,
        created_at: DateTime::from_timestamp_millis(now).expect("valid timestamp"),
        scanned_at: None,
    }
}
