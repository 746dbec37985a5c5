//! esya_ticketing library: QR-code event ticketing.
//!
//! Attendees register with a name and email address, receive a single-use
//! ticket as a QR code by email, and are admitted when the QR code's
//! validation link is opened at the entrance. Tickets live in SQLite.
//!
//! # Example
//!
//! ```no_run
//! use esya_ticketing::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 8080,
//!     base_url: "https://tickets.example.com".to_string(),
//!     ..Default::default()
//! };
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod config;
pub mod error_handling;
pub mod health;
pub mod initialization;
pub mod mail;
pub mod pages;
pub mod qr;
pub mod server;
pub mod storage;
pub mod ticket;

// Re-export public API
pub use app::wait_for_shutdown_signal;
pub use config::{Config, ConfigValidationError, Environment, LogFormat, LogLevel};
pub use health::{HealthPolicy, HealthReport, HealthState, HealthTracker};
pub use mail::{SmtpMailer, TicketEmail, TicketMailer};
pub use server::{build_router, init_database, run_server, serve, AppState};
pub use storage::run_migrations;
pub use ticket::{Registration, Ticket};
