//! Domain primitives with validated constructors.

use postlogs_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// `LoggerName` is the empty string.
    InvalidLoggerName {
        /// Length of the raw input.
        input_length: usize,
    },
    /// `LogGroupName` is empty after trimming.
    InvalidLogGroupName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `LogStreamName` is empty after trimming.
    InvalidLogStreamName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidLoggerName { .. } => ErrorCode::new("domain", "invalid_logger_name"),
            Self::InvalidLogGroupName { .. } => ErrorCode::new("domain", "invalid_log_group_name"),
            Self::InvalidLogStreamName { .. } => {
                ErrorCode::new("domain", "invalid_log_stream_name")
            },
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLoggerName { .. } => formatter.write_str("LoggerName must be non-empty"),
            Self::InvalidLogGroupName { .. } => {
                formatter.write_str("LogGroupName must be non-empty")
            },
            Self::InvalidLogStreamName { .. } => {
                formatter.write_str("LogStreamName must be non-empty")
            },
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            PrimitiveError::InvalidLoggerName { input_length }
            | PrimitiveError::InvalidLogGroupName { input_length }
            | PrimitiveError::InvalidLogStreamName { input_length } => {
                envelope.with_metadata("input_length", input_length.to_string())
            },
        }
    }
}

/// Name of a logical logger; prefixes console lines and seeds stream names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoggerName(Box<str>);

impl LoggerName {
    /// Parse a `LoggerName` from caller input.
    ///
    /// The name is kept verbatim, whitespace included; only the empty string
    /// is rejected.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        if raw.is_empty() {
            return Err(PrimitiveError::InvalidLoggerName { input_length: 0 });
        }

        Ok(Self(raw.to_owned().into_boxed_str()))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// CloudWatch Logs log group identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogGroupName(Box<str>);

impl LogGroupName {
    /// Parse a `LogGroupName` from caller input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        let Some(trimmed) = trimmed_non_empty(raw) else {
            return Err(PrimitiveError::InvalidLogGroupName {
                input_length: raw.len(),
            });
        };

        Ok(Self(trimmed.to_owned().into_boxed_str()))
    }

    /// Parse an optional group, treating absent and blank input alike.
    ///
    /// Returns `None` when no usable group name was supplied.
    #[must_use]
    pub fn parse_optional(input: Option<&str>) -> Option<Self> {
        input.and_then(|raw| Self::parse(raw).ok())
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Log stream within a log group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogStreamName(Box<str>);

impl LogStreamName {
    /// Parse a `LogStreamName` from caller input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        let Some(trimmed) = trimmed_non_empty(raw) else {
            return Err(PrimitiveError::InvalidLogStreamName {
                input_length: raw.len(),
            });
        };

        Ok(Self(trimmed.to_owned().into_boxed_str()))
    }

    pub(crate) const fn from_generated(value: Box<str>) -> Self {
        Self(value)
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_str_traits {
    ($($name:ident),+ $(,)?) => {
        $(
            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str(self.as_str())
                }
            }
        )+
    };
}

impl_str_traits!(LoggerName, LogGroupName, LogStreamName);

fn trimmed_non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
