//! Log entry format module
//!
//! Two renderings of the same entry:
//! - `json` for log files, one object per line
//! - `simple` for the console (`level: message`)

use chrono::{DateTime, Local};
use serde::Serialize;

use super::Level;

/// A single log entry
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry<'a> {
    pub level: Level,
    pub message: &'a str,
    pub service: &'a str,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Local>,
}

impl<'a> LogEntry<'a> {
    /// Create a new entry with current timestamp
    pub fn new(level: Level, message: &'a str, service: &'a str) -> Self {
        Self {
            level,
            message,
            service,
            timestamp: Local::now(),
        }
    }

    /// JSON structured log format
    pub fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.format_simple())
    }

    /// Console format
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.level, self.message)
    }
}

fn serialize_rfc3339<S>(time: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&time.to_rfc3339())
}
