//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (console and persistent log file)
//! - HTTP client for health probes
//! - `.env` loading

mod client;
mod logger;

pub use client::init_probe_client;
pub use logger::{init_logger_to_file, init_logger_with};

/// Loads variables from a `.env` file, if one exists.
///
/// Looks in the current directory first, then next to the executable.
/// Variables already present in the environment are never overridden.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }
}
