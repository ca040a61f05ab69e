//! CloudWatch Logs client adapter (AWS SDK).

use aws_sdk_cloudwatchlogs::Client;
use aws_sdk_cloudwatchlogs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use postlogs_ports::{
    BoxFuture, CloudLogEvent, CloudLogsPort, CreateLogStreamRequest, PutLogEventsOutput,
    PutLogEventsRequest, SequenceToken, cloud_logs_service_error,
};
use postlogs_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::fmt::Debug;

/// Service error types worth retrying by whoever invoked us.
const RETRIABLE_ERROR_TYPES: &[&str] = &[
    "ThrottlingException",
    "Throttling",
    "ServiceUnavailableException",
    "ServiceUnavailable",
];

/// [`CloudLogsPort`] backed by the AWS SDK client.
#[derive(Debug, Clone)]
pub struct CloudWatchLogs {
    client: Client,
}

impl CloudWatchLogs {
    /// Wrap a configured SDK client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    async fn create(&self, request: CreateLogStreamRequest) -> Result<()> {
        self.client
            .create_log_stream()
            .log_group_name(request.log_group.as_str())
            .log_stream_name(request.log_stream.as_str())
            .send()
            .await
            .map_err(|error| map_sdk_error(&error, "CreateLogStream"))?;
        Ok(())
    }

    async fn put(&self, request: PutLogEventsRequest) -> Result<PutLogEventsOutput> {
        let events = request
            .events
            .iter()
            .map(to_input_log_event)
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .put_log_events()
            .log_group_name(request.log_group.as_str())
            .log_stream_name(request.log_stream.as_str())
            .set_log_events(Some(events))
            .set_sequence_token(
                request
                    .sequence_token
                    .map(|token| token.as_str().to_owned()),
            )
            .send()
            .await
            .map_err(|error| map_sdk_error(&error, "PutLogEvents"))?;

        if let Some(rejected) = output.rejected_log_events_info() {
            tracing::warn!(?rejected, "CloudWatch rejected part of the batch");
        }

        Ok(PutLogEventsOutput {
            next_sequence_token: output.next_sequence_token().map(SequenceToken::new),
        })
    }
}

impl CloudLogsPort for CloudWatchLogs {
    fn create_log_stream(&self, request: CreateLogStreamRequest) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.create(request))
    }

    fn put_log_events(
        &self,
        request: PutLogEventsRequest,
    ) -> BoxFuture<'_, Result<PutLogEventsOutput>> {
        Box::pin(self.put(request))
    }
}

fn to_input_log_event(event: &CloudLogEvent) -> Result<InputLogEvent> {
    InputLogEvent::builder()
        .timestamp(event.timestamp_ms)
        .message(event.message.as_ref())
        .build()
        .map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("cloudwatch", "invalid_event"),
                format!("invalid log event: {error}"),
            )
        })
}

fn map_sdk_error<E, R>(error: &SdkError<E, R>, operation: &'static str) -> ErrorEnvelope
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    let envelope = match error {
        SdkError::TimeoutError(_) => ErrorEnvelope::unexpected(
            ErrorCode::timeout(),
            format!("CloudWatch {operation} timed out"),
            ErrorClass::Retriable,
        ),
        SdkError::DispatchFailure(_) => ErrorEnvelope::unexpected(
            ErrorCode::io(),
            format!(
                "CloudWatch {operation} dispatch failed: {}",
                DisplayErrorContext(error)
            ),
            ErrorClass::Retriable,
        ),
        _ => match error.code() {
            Some(error_type) => cloud_logs_service_error(
                error_type,
                error.message().unwrap_or(error_type),
                classify_service_error(error_type),
            ),
            None => ErrorEnvelope::unexpected(
                ErrorCode::new("cloudwatch", "request_failed"),
                format!(
                    "CloudWatch {operation} failed: {}",
                    DisplayErrorContext(error)
                ),
                ErrorClass::NonRetriable,
            ),
        },
    };
    envelope.with_metadata("operation", operation)
}

fn classify_service_error(error_type: &str) -> ErrorClass {
    if RETRIABLE_ERROR_TYPES.contains(&error_type) {
        ErrorClass::Retriable
    } else {
        ErrorClass::NonRetriable
    }
}
