//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (ports, timeouts, health-check policy)
//! - The library `Config` and its validation
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, ProbeArgs, ServeArgs};
pub use constants::*;
pub use types::{Config, ConfigValidationError, Environment, LogFormat, LogLevel};
