//! Logging system: stderr diagnostics plus an optional daily-rotated debug log.

use anyhow::Result;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Prefix of rotated log file names.
const LOG_FILE_PREFIX: &str = "kvconf";

/// Logging options, usually taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Log at DEBUG and write a log file
    pub debug: bool,

    /// Only report errors on stderr
    pub quiet: bool,

    /// Directory for log files (defaults to [`default_log_dir`])
    pub log_dir: Option<PathBuf>,
}

impl LogOptions {
    /// Level directive added on top of `RUST_LOG`.
    pub fn level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::WARN
        }
    }

    /// Directory the debug log is written to.
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(default_log_dir)
    }
}

/// Default log directory: ~/.config/kvconf/logs
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("kvconf")
        .join("logs")
}

/// Initialize the logging system.
pub fn init(options: &LogOptions) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    let file_layer = if options.debug {
        let log_dir = options.resolved_log_dir();
        if !log_dir.exists() {
            fs::create_dir_all(&log_dir)?;
        }

        cleanup_old_logs(&log_dir)?;

        let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

        // Use local timezone for timestamps
        let time_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
        let timer = OffsetTime::new(local_offset, time_format);

        Some(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(timer),
        )
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(options.level().into()))
        .with(stderr_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

/// Clean up log files older than 2 days.
pub fn cleanup_old_logs(log_path: &Path) -> Result<()> {
    use std::time::{Duration, SystemTime};

    let two_days = Duration::from_secs(2 * 24 * 60 * 60);
    let cutoff = SystemTime::now() - two_days;

    if !log_path.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(log_path)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };

        if !filename.starts_with(LOG_FILE_PREFIX) {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff {
                    let _ = fs::remove_file(&path);
                }
            }
        }
    }

    Ok(())
}
