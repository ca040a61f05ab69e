//! The log record emitted by every delegate.

use serde::{Deserialize, Serialize};

/// A single log event supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Event time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Event text.
    pub message: Box<str>,
}

impl LogRecord {
    /// Build a record for an explicit timestamp.
    pub fn new(timestamp: i64, message: impl Into<Box<str>>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }

    /// Build a record stamped with the current wall-clock time.
    pub fn now(message: impl Into<Box<str>>) -> Self {
        Self::new(chrono::Utc::now().timestamp_millis(), message)
    }
}
