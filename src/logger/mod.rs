//! Logger module
//!
//! Provides logging utilities for the arithmetic service including:
//! - Server lifecycle logging
//! - Per-request operation logging
//! - Error and warning logging
//! - File-based logging (error file plus combined file)

mod format;
pub mod writer;

use crate::config::{Config, LoggingConfig};
use format::LogEntry;
use serde::Serialize;
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;
use writer::{ConsoleStream, LogFile};

/// Log severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    const fn console_stream(self) -> ConsoleStream {
        match self {
            Self::Error | Self::Warn => ConsoleStream::Stderr,
            Self::Info | Self::Debug => ConsoleStream::Stdout,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("failed to open log file: {0}")]
    Io(#[from] io::Error),
}

/// Leveled logger writing JSON lines to files and plain lines to the console.
///
/// Built once at startup and shared through `AppState`.
pub struct Logger {
    level: Level,
    service: String,
    console: bool,
    error_file: Option<LogFile>,
    combined_file: Option<LogFile>,
}

impl Logger {
    /// Build from configuration. An empty file path disables that file.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, LoggerError> {
        let error_file = config
            .error_log_file
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(LogFile::open)
            .transpose()?;
        let combined_file = config
            .combined_log_file
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(LogFile::open)
            .transpose()?;

        Ok(Self {
            level: config.level.parse()?,
            service: config.service.clone(),
            console: config.console,
            error_file,
            combined_file,
        })
    }

    /// Whether entries at `level` are written
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    pub fn log(&self, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry::new(level, message, &self.service);

        if self.error_file.is_some() || self.combined_file.is_some() {
            let line = entry.format_json();
            if level == Level::Error {
                if let Some(file) = &self.error_file {
                    file.write_line(&line);
                }
            }
            if let Some(file) = &self.combined_file {
                file.write_line(&line);
            }
        }

        if self.console {
            writer::write_console(level.console_stream(), &entry.format_simple());
        }
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Reopen both log files (log rotation)
    pub fn reopen(&self) -> io::Result<()> {
        for file in [&self.error_file, &self.combined_file].into_iter().flatten() {
            file.reopen()?;
        }
        Ok(())
    }

    pub fn log_server_start(&self, addr: &SocketAddr, config: &Config) {
        self.info(&format!("Arithmetic service listening at http://{addr}"));
        self.debug(&format!("Log level: {}", self.level));
        if let Some(workers) = config.server.workers {
            self.debug(&format!("Worker threads: {workers}"));
        }
        if let Some(file) = &self.error_file {
            self.debug(&format!("Error log: {}", file.path().display()));
        }
        if let Some(file) = &self.combined_file {
            self.debug(&format!("Combined log: {}", file.path().display()));
        }
        if let Some(max) = config.performance.max_connections {
            self.debug(&format!("Max connections: {max}"));
        }
    }

    pub fn log_operation_performed(&self, operation: &str, n1: f64, n2: f64, result: f64) {
        self.info(&format!(
            "Operation performed: {operation} with n1: {}, n2: {}, result: {}",
            display_number(n1),
            display_number(n2),
            display_number(result),
        ));
    }

    pub fn log_operation_failed(&self, operation: &str, message: &str) {
        self.error(&format!(
            "Error performing operation: {operation}. Error: {message}"
        ));
    }

    pub fn log_connection_accepted(&self, peer_addr: &SocketAddr) {
        self.debug(&format!("[Connection] Accepted from: {peer_addr}"));
    }

    pub fn log_connection_error(&self, err: &impl fmt::Debug) {
        self.error(&format!("Failed to serve connection: {err:?}"));
    }

    pub fn log_shutdown(&self) {
        self.info("Arithmetic service shutting down");
    }
}

/// Render a number for log lines, spelling non-finite values as
/// `Infinity`, `-Infinity` and `NaN`.
fn display_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}
