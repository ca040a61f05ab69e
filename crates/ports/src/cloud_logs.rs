//! Remote log backend boundary contract.
//!
//! Shaped after the CloudWatch Logs API: a stream is created once, then
//! appended to with batches, each append chained to the previous one through
//! a sequence token.
//!
//! Backend failures are [`ErrorEnvelope`]s in the [`CLOUD_LOGS_ERROR_NAMESPACE`]
//! namespace whose code is the backend's own error type, so callers can match
//! on it exactly.

use crate::BoxFuture;
use postlogs_domain::{LogGroupName, LogRecord, LogStreamName};
use postlogs_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::fmt;

/// Error namespace used for backend-reported failures.
pub const CLOUD_LOGS_ERROR_NAMESPACE: &str = "cloudwatch";

/// Backend error type reported when a stream already exists.
pub const RESOURCE_ALREADY_EXISTS: &str = "ResourceAlreadyExistsException";

/// Error code for a backend-reported error type.
pub fn cloud_logs_error_code(error_type: impl Into<String>) -> ErrorCode {
    ErrorCode::new(CLOUD_LOGS_ERROR_NAMESPACE, error_type)
}

/// Envelope for a failure reported by the backend itself.
pub fn cloud_logs_service_error(
    error_type: &str,
    message: impl Into<String>,
    class: ErrorClass,
) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(cloud_logs_error_code(error_type), message, class)
        .with_metadata("error_type", error_type)
}

/// Returns true when `error` is the backend's "stream already exists" failure.
#[must_use]
pub fn is_resource_already_exists(error: &ErrorEnvelope) -> bool {
    error.has_code(CLOUD_LOGS_ERROR_NAMESPACE, RESOURCE_ALREADY_EXISTS)
}

/// Opaque token chaining successive appends to one stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceToken(Box<str>);

impl SequenceToken {
    /// Wrap a backend-issued token.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Access the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SequenceToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// One event in the shape the backend expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudLogEvent {
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Event text.
    pub message: Box<str>,
}

impl From<&LogRecord> for CloudLogEvent {
    fn from(record: &LogRecord) -> Self {
        Self {
            timestamp_ms: record.timestamp,
            message: record.message.clone(),
        }
    }
}

/// Owned request to create a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLogStreamRequest {
    /// Target group.
    pub log_group: LogGroupName,
    /// Stream to create.
    pub log_stream: LogStreamName,
}

/// Owned request to append events to a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutLogEventsRequest {
    /// Target group.
    pub log_group: LogGroupName,
    /// Target stream.
    pub log_stream: LogStreamName,
    /// Events, in caller order.
    pub events: Vec<CloudLogEvent>,
    /// Token returned by the previous append, absent on the first.
    pub sequence_token: Option<SequenceToken>,
}

/// Result of a successful append.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutLogEventsOutput {
    /// Token to pass on the next append.
    pub next_sequence_token: Option<SequenceToken>,
}

/// Boundary contract for the remote log backend.
pub trait CloudLogsPort: Send + Sync {
    /// Create `request.log_stream` inside `request.log_group`.
    fn create_log_stream(&self, request: CreateLogStreamRequest) -> BoxFuture<'_, Result<()>>;

    /// Append a batch of events to a stream.
    fn put_log_events(
        &self,
        request: PutLogEventsRequest,
    ) -> BoxFuture<'_, Result<PutLogEventsOutput>>;
}
