//! Command-line interface.
//!
//! Every serve option can also be supplied through the environment (and so
//! through the compose `env_file`), matching the variable names the deployment
//! already uses.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DB_PATH, DEFAULT_BASE_URL, DEFAULT_HEALTH_URL, DEFAULT_HOST, DEFAULT_LOG_DIR, DEFAULT_PORT,
    DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER, HEALTH_INTERVAL, HEALTH_RETRIES, HEALTH_START_PERIOD,
    HEALTH_TIMEOUT,
};
use crate::config::types::{Config, Environment, LogFormat, LogLevel};
use crate::health::HealthPolicy;

/// QR-code ticketing service.
#[derive(Debug, Parser)]
#[command(name = "esya_ticketing", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP ticketing server
    Serve(ServeArgs),
    /// Probe the health endpoint once; exit status 0 when healthy
    Healthcheck(ProbeArgs),
    /// Probe the health endpoint periodically and log state transitions
    Monitor(ProbeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Deployment environment
    #[arg(long, env = "FLASK_ENV", value_enum, default_value = "production")]
    pub environment: Environment,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Public base URL encoded into ticket QR codes
    #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// SMTP relay host
    #[arg(long, env = "SMTP_SERVER", default_value = DEFAULT_SMTP_SERVER)]
    pub smtp_server: String,

    /// SMTP relay port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    /// Sender address and SMTP username
    #[arg(long, env = "SENDER_EMAIL")]
    pub sender_email: Option<String>,

    /// SMTP password
    #[arg(long, env = "SENDER_PASSWORD", hide_env_values = true)]
    pub sender_password: Option<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Directory for the persistent log file
    #[arg(long, env = "LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Log to stderr only
    #[arg(long)]
    pub no_log_file: bool,
}

impl From<ServeArgs> for Config {
    fn from(args: ServeArgs) -> Self {
        Config {
            host: args.host,
            port: args.port,
            environment: args.environment,
            db_path: args.db_path,
            base_url: args.base_url,
            smtp_server: args.smtp_server,
            smtp_port: args.smtp_port,
            sender_email: args.sender_email.filter(|s| !s.trim().is_empty()),
            sender_password: args.sender_password.filter(|s| !s.is_empty()),
            log_level: args.log_level,
            log_format: args.log_format,
            log_dir: if args.no_log_file {
                None
            } else {
                Some(args.log_dir)
            },
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProbeArgs {
    /// Health endpoint to probe
    #[arg(long, default_value = DEFAULT_HEALTH_URL)]
    pub url: String,

    /// Seconds between probes
    #[arg(long, default_value_t = HEALTH_INTERVAL.as_secs())]
    pub interval: u64,

    /// Seconds before a single probe is considered failed
    #[arg(long, default_value_t = HEALTH_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Consecutive failures before the service is unhealthy
    #[arg(long, default_value_t = HEALTH_RETRIES)]
    pub retries: u32,

    /// Grace period in seconds during which failures are not counted
    #[arg(long, default_value_t = HEALTH_START_PERIOD.as_secs())]
    pub start_period: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl ProbeArgs {
    pub fn policy(&self) -> HealthPolicy {
        HealthPolicy {
            interval: Duration::from_secs(self.interval),
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
            start_period: Duration::from_secs(self.start_period),
        }
    }
}
