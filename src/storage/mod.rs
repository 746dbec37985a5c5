// storage/mod.rs
// Database operations module

pub mod migrations;
pub mod models;
pub mod pool;
mod test_helpers;
pub mod tickets;

// Re-export commonly used items
pub use migrations::run_migrations;
pub use models::{ScanOutcome, TicketCounts};
pub use pool::init_db_pool_with_path;
pub use tickets::{count_tickets, delete_ticket, get_ticket, insert_ticket, mark_ticket_scanned};
