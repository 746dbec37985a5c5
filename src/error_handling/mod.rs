//! Error handling and service statistics.
//!
//! This module provides:
//! - Error type definitions for each layer (storage, mail, QR, probes)
//! - Event counters shared by the HTTP handlers
//! - Retry strategy configuration for SMTP delivery

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{get_retry_strategy, is_retriable_mail_error};
pub use stats::ServiceStats;
pub use types::{
    DatabaseError, EventType, InitializationError, MailError, ProbeError, QrError,
};
