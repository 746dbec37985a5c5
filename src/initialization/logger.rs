//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting,
//! optionally mirroring every line into a persistent log file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{LogFormat, LOG_FILE_NAME};
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if logger initialization fails.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let builder = configured_builder(level, format, true);
    finish(builder)
}

/// Initializes the logger and appends every line to `<log_dir>/esya_ticketing.log`.
///
/// The directory is created if needed and the file is opened in append mode,
/// so history survives container restarts when the directory is a bind mount.
/// Lines go to stderr as well. File output is never colorized.
///
/// # Errors
///
/// Returns `InitializationError::LoggerSetupError` if the directory or file
/// cannot be created.
pub fn init_logger_to_file(
    level: LevelFilter,
    format: LogFormat,
    log_dir: &Path,
) -> Result<PathBuf, InitializationError> {
    let (file, path) = open_log_file(log_dir)?;
    let mut builder = configured_builder(level, format, false);
    builder.target(env_logger::Target::Pipe(Box::new(TeeWriter {
        file,
        console: io::stderr(),
    })));
    finish(builder)?;
    Ok(path)
}

/// Creates the log directory and opens the log file for appending.
pub(crate) fn open_log_file(log_dir: &Path) -> Result<(File, PathBuf), InitializationError> {
    fs::create_dir_all(log_dir).map_err(|e| {
        InitializationError::LoggerSetupError(format!(
            "failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            InitializationError::LoggerSetupError(format!(
                "failed to open log file {}: {e}",
                path.display()
            ))
        })?;
    Ok((file, path))
}

fn configured_builder(level: LevelFilter, format: LogFormat, color: bool) -> env_logger::Builder {
    colored::control::set_override(color);

    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("sqlx", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("lettre", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("esya_ticketing", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "✔️",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder
}

fn finish(mut builder: env_logger::Builder) -> Result<(), InitializationError> {
    // try_init() so repeated initialization in tests returns an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

/// Writes each log line to the log file and to stderr.
struct TeeWriter {
    file: File,
    console: io::Stderr,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        // Console output is best effort; the file is the durable copy
        let _ = self.console.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let _ = self.console.flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use std::io::Read;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Collects everything a logger writes, for inspecting formatted lines.
    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedOutput {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("capture lock")).to_string()
        }
    }

    fn log_through(format: LogFormat, level: log::Level, message: &str) -> String {
        let output = CapturedOutput::default();
        let mut builder = configured_builder(LevelFilter::Info, format, false);
        builder.target(env_logger::Target::Pipe(Box::new(output.clone())));
        let logger = builder.build();

        logger.log(
            &log::Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target("esya_ticketing::server")
                .build(),
        );
        logger.flush();
        output.contents()
    }

    #[test]
    fn test_json_format_writes_one_object_per_line() {
        let output = log_through(LogFormat::Json, log::Level::Warn, "ticket \"abc\" rejected");
        let line = output.lines().next().expect("one log line");
        let json: serde_json::Value = serde_json::from_str(line).expect("line should be JSON");

        assert_eq!(json["level"], "WARN");
        assert_eq!(json["target"], "esya_ticketing::server");
        assert_eq!(json["msg"], "ticket \"abc\" rejected");
        assert!(json["ts"].as_i64().is_some());
    }

    #[test]
    fn test_plain_format_includes_level_and_message() {
        let output = log_through(LogFormat::Plain, log::Level::Info, "server listening");
        assert!(output.contains("INFO"));
        assert!(output.contains("esya_ticketing::server"));
        assert!(output.trim_end().ends_with("server listening"));
    }

    #[test]
    fn test_level_filter_drops_debug_lines() {
        let output = log_through(LogFormat::Json, log::Level::Debug, "noisy detail");
        assert!(output.is_empty());
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let temp = TempDir::new().expect("temp dir");
        let log_dir = temp.path().join("nested").join("logs");

        let (_file, path) = open_log_file(&log_dir).expect("should open log file");
        assert!(log_dir.is_dir());
        assert_eq!(path, log_dir.join("esya_ticketing.log"));
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        let temp = TempDir::new().expect("temp dir");

        {
            let (mut file, _) = open_log_file(temp.path()).expect("first open");
            writeln!(file, "first run").expect("write");
        }
        {
            // Simulates a restart: existing content must survive
            let (mut file, _) = open_log_file(temp.path()).expect("second open");
            writeln!(file, "second run").expect("write");
        }

        let mut contents = String::new();
        File::open(temp.path().join(LOG_FILE_NAME))
            .expect("log file")
            .read_to_string(&mut contents)
            .expect("read");
        assert_eq!(contents, "first run\nsecond run\n");
    }

    #[test]
    fn test_tee_writer_writes_file() {
        let temp = TempDir::new().expect("temp dir");
        let (file, path) = open_log_file(temp.path()).expect("open");
        let mut tee = TeeWriter {
            file,
            console: io::stderr(),
        };
        tee.write_all(b"hello\n").expect("write");
        tee.flush().expect("flush");

        let contents = fs::read_to_string(path).expect("read");
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn test_open_log_file_fails_on_file_path() {
        let temp = TempDir::new().expect("temp dir");
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, "x").expect("write");

        let result = open_log_file(&blocker);
        assert!(matches!(
            result,
            Err(InitializationError::LoggerSetupError(_))
        ));
    }
}
