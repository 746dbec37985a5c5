// storage/migrations.rs
// Database migration management

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Runs the SQLx migrations from the `migrations/` directory.
///
/// The migrations are embedded at compile time so the deployed binary does
/// not need the source tree next to it.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
