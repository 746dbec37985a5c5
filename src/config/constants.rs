//! Configuration constants.
//!
//! This module defines the defaults and operational limits used throughout the
//! service: network binding, storage location, SMTP delivery, ticket rendering
//! and the container health-check policy.

use std::time::Duration;

// Network binding (the container maps host 5000 to container 5000)
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default SQLite database location
pub const DB_PATH: &str = "./esya_tickets.db";

/// Default log directory (bind-mounted to `/app/logs` inside the container)
pub const DEFAULT_LOG_DIR: &str = "logs";
/// Log file name inside the log directory. Opened in append mode so restarts keep history.
pub const LOG_FILE_NAME: &str = "esya_ticketing.log";

// SMTP delivery
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Per-attempt SMTP timeout in seconds
pub const SMTP_TIMEOUT_SECS: u64 = 30;
/// Display name used in the `From` header of ticket emails
pub const SENDER_DISPLAY_NAME: &str = "ESYA Fest";

// Retry configuration for transient SMTP failures
/// Base of the exponential backoff (delays grow as powers of this value)
pub const RETRY_BASE: u64 = 2;
/// Multiplier applied to every backoff step, in milliseconds
pub const RETRY_FACTOR_MS: u64 = 250;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Number of retries after the first attempt (3 attempts total)
pub const RETRY_MAX_RETRIES: usize = 2;

// Ticket rendering
/// Number of leading ticket-id characters shown in subjects and file names
pub const SHORT_ID_LEN: usize = 8;
/// Pixel size of one QR module
pub const QR_MODULE_PIXELS: u32 = 10;
pub const MAX_NAME_LENGTH: usize = 200;
/// RFC 5321 path limit
pub const MAX_EMAIL_LENGTH: usize = 254;

// Container health-check policy
pub const HEALTH_PATH: &str = "/health";
pub const DEFAULT_HEALTH_URL: &str = "http://127.0.0.1:5000/health";
pub const HEALTH_INTERVAL: Duration = Duration::from_secs(30);
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
pub const HEALTH_RETRIES: u32 = 3;
pub const HEALTH_START_PERIOD: Duration = Duration::from_secs(40);
