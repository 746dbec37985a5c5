//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `esya_ticketing` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use esya_ticketing::config::{Cli, Command, ProbeArgs};
use esya_ticketing::health::{monitor, probe_once, HealthState};
use esya_ticketing::initialization::{
    init_logger_to_file, init_logger_with, init_probe_client, load_dotenv,
};
use esya_ticketing::{run_server, wait_for_shutdown_signal, Config, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before parsing so clap's env fallbacks see the file's variables
    load_dotenv();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(Config::from(args)).await,
        Command::Healthcheck(args) => healthcheck(args).await,
        Command::Monitor(args) => run_monitor(args).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    let level = config.effective_log_level();
    match &config.log_dir {
        Some(dir) => {
            let path = init_logger_to_file(level, config.log_format.clone(), dir)
                .context("Failed to initialize logger")?;
            log::info!("Logging to {}", path.display());
        }
        None => init_logger_with(level, config.log_format.clone())
            .context("Failed to initialize logger")?,
    }

    if let Err(e) = run_server(config).await {
        log::error!("esya_ticketing error: {:#}", e);
        eprintln!("esya_ticketing error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn healthcheck(args: ProbeArgs) -> Result<()> {
    init_logger_with(args.log_level.clone().into(), LogFormat::Plain)
        .context("Failed to initialize logger")?;

    let client = init_probe_client(args.policy().timeout).context("Failed to build HTTP client")?;
    match probe_once(&client, &args.url).await {
        Ok(report) => {
            println!(
                "healthy (database_connected={}, timestamp={})",
                report.database_connected, report.timestamp
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("unhealthy: {e}");
            process::exit(1);
        }
    }
}

async fn run_monitor(args: ProbeArgs) -> Result<()> {
    init_logger_with(args.log_level.clone().into(), LogFormat::Plain)
        .context("Failed to initialize logger")?;

    let policy = args.policy();
    let client = init_probe_client(policy.timeout).context("Failed to build HTTP client")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        ctrl_c.cancel();
    });

    let state = monitor(&client, &args.url, policy, cancel).await;
    println!("final health state: {state}");
    if state == HealthState::Unhealthy {
        process::exit(1);
    }
    Ok(())
}
