//! Configuration types.
//!
//! This module defines the enums and structs shared by the CLI and the library:
//! log settings, the deployment environment, and the service `Config`.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DB_PATH, DEFAULT_BASE_URL, DEFAULT_HOST, DEFAULT_LOG_DIR, DEFAULT_PORT, DEFAULT_SMTP_PORT,
    DEFAULT_SMTP_SERVER,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Deployment environment, read from `FLASK_ENV` for compatibility with the
/// existing compose file.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the server. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use esya_ticketing::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     port: 8080,
///     db_path: PathBuf::from("/tmp/tickets.db"),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to
    pub host: String,

    /// Port to bind the HTTP server to
    pub port: u16,

    /// Deployment environment
    pub environment: Environment,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Public URL prefix encoded into QR codes
    pub base_url: String,

    /// SMTP relay host
    pub smtp_server: String,

    /// SMTP relay port (STARTTLS)
    pub smtp_port: u16,

    /// Sender address; also the SMTP username
    pub sender_email: Option<String>,

    /// SMTP password
    pub sender_password: Option<String>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Directory for the persistent log file (None disables file logging)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::Production,
            db_path: PathBuf::from(DB_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            smtp_server: DEFAULT_SMTP_SERVER.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            sender_email: None,
            sender_password: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Actionable description of the problem
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Checks the configuration for values the server cannot start with.
    ///
    /// Missing SMTP credentials are not an error here: the server starts and
    /// registration fails with a clear message until they are provided.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.port == 0 {
            return Err(ConfigValidationError {
                field: "port",
                message: "port must be greater than 0".to_string(),
            });
        }

        if self.smtp_port == 0 {
            return Err(ConfigValidationError {
                field: "smtp_port",
                message: "smtp_port must be greater than 0 (usually 587 for STARTTLS)"
                    .to_string(),
            });
        }

        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!(
                        "base_url must use http or https, got '{}'",
                        parsed.scheme()
                    ),
                })
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!(
                        "base_url '{}' is not a valid URL ({e}); expected e.g. https://tickets.example.com",
                        self.base_url
                    ),
                })
            }
        }

        Ok(())
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Effective log level: development mode never logs below Debug.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        let level = log::LevelFilter::from(self.log_level.clone());
        if self.environment.is_development() {
            level.max(log::LevelFilter::Debug)
        } else {
            level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.smtp_server, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.db_path, PathBuf::from("./esya_tickets.db"));
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
        assert!(config.sender_email.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_development_raises_log_level() {
        let config = Config {
            environment: Environment::Development,
            log_level: LogLevel::Warn,
            ..Default::default()
        };
        assert_eq!(config.effective_log_level(), log::LevelFilter::Debug);

        let config = Config {
            environment: Environment::Development,
            log_level: LogLevel::Trace,
            ..Default::default()
        };
        assert_eq!(config.effective_log_level(), log::LevelFilter::Trace);

        let config = Config {
            log_level: LogLevel::Warn,
            ..Default::default()
        };
        assert_eq!(config.effective_log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = Config {
            port: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "port");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "base_url");

        let config = Config {
            base_url: "ftp://tickets.example.com".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "base_url");
        assert!(err.message.contains("ftp"));
    }
}
