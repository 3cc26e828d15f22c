//! Log entry record handed to the host's log view

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A log entry: time (`HH:MM:SS`), type (e.g. INFO, ERROR) and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    time: String,
    #[serde(rename = "type")]
    entry_type: String,
    message: String,
}

impl LogEntry {
    pub fn new(
        time: impl Into<String>,
        entry_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            entry_type: entry_type.into(),
            message: message.into(),
        }
    }

    /// Creates an entry stamped with the current local time
    pub fn now(entry_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Local::now().format("%H:%M:%S").to_string(), entry_type, message)
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.time, self.entry_type, self.message)
    }
}
