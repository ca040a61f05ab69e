//! CloudWatch log delegate.
//!
//! Each delegate owns one freshly named stream. Appends are chained through
//! the sequence token returned by the previous append; the token is held
//! behind an async mutex for the whole request so appends on one delegate
//! never overlap.

use postlogs_domain::unique_log_stream_name;
use postlogs_ports::{
    BoxFuture, CloudLogEvent, CloudLogsPort, CreateLogStreamRequest, LogDelegate, LogGroupName,
    LogRecord, LogStreamName, LoggerName, PutLogEventsRequest, SequenceToken,
    is_resource_already_exists,
};
use postlogs_shared::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Log delegate appending batches to a CloudWatch Logs stream.
pub struct CloudLogDelegate {
    port: Arc<dyn CloudLogsPort>,
    log_group: LogGroupName,
    log_stream: LogStreamName,
    sequence_token: Mutex<Option<SequenceToken>>,
}

impl CloudLogDelegate {
    /// Create a uniquely named stream for `logger_name` and return a delegate
    /// writing to it.
    ///
    /// A stream that already exists is accepted. Any other backend failure is
    /// returned unchanged.
    pub async fn create(
        logger_name: &LoggerName,
        log_group: LogGroupName,
        port: Arc<dyn CloudLogsPort>,
    ) -> Result<Self> {
        let log_stream = unique_log_stream_name(logger_name.as_str());
        let request = CreateLogStreamRequest {
            log_group: log_group.clone(),
            log_stream: log_stream.clone(),
        };

        match port.create_log_stream(request).await {
            Ok(()) => {
                tracing::debug!(%log_group, %log_stream, "created log stream");
            },
            Err(error) if is_resource_already_exists(&error) => {
                tracing::debug!(%log_group, %log_stream, "log stream already exists");
            },
            Err(error) => return Err(error),
        }

        Ok(Self {
            port,
            log_group,
            log_stream,
            sequence_token: Mutex::new(None),
        })
    }

    /// Group this delegate writes to.
    #[must_use]
    pub const fn log_group(&self) -> &LogGroupName {
        &self.log_group
    }

    /// Stream created for this delegate.
    #[must_use]
    pub const fn log_stream(&self) -> &LogStreamName {
        &self.log_stream
    }

    /// Token the next append will carry.
    pub async fn sequence_token(&self) -> Option<SequenceToken> {
        self.sequence_token.lock().await.clone()
    }

    async fn put(&self, records: &[LogRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut token = self.sequence_token.lock().await;
        let request = PutLogEventsRequest {
            log_group: self.log_group.clone(),
            log_stream: self.log_stream.clone(),
            events: records.iter().map(CloudLogEvent::from).collect(),
            sequence_token: token.clone(),
        };

        let output = self.port.put_log_events(request).await?;
        tracing::debug!(
            log_stream = %self.log_stream,
            events = records.len(),
            "appended log events"
        );
        *token = output.next_sequence_token;
        Ok(())
    }
}

impl LogDelegate for CloudLogDelegate {
    fn log<'a>(&'a self, records: &'a [LogRecord]) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.put(records))
    }
}
