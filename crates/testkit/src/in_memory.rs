//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests
//! - Deterministic contract tests for the ports layer

use postlogs_ports::{
    BoxFuture, CloudLogsPort, CreateLogStreamRequest, LogEvent, LogFields, LogSink, LoggerPort,
    PutLogEventsOutput, PutLogEventsRequest, SequenceToken,
};
use postlogs_shared::{ErrorEnvelope, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Log sink collecting lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    /// Drain the collected lines.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().expect("memory sink lock");
        std::mem::take(&mut *guard)
    }
}

impl LogSink for MemoryLogSink {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().expect("memory sink lock");
        guard.push(line.to_string());
    }
}

/// Logger capturing events in memory. Children share the parent's buffer and
/// merge their base fields into each event.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
    base_fields: LogFields,
}

impl MemoryLogger {
    /// Snapshot of the captured events, in emission order.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().expect("memory logger lock").clone()
    }

    /// Captured events with the given event name.
    pub fn events_named(&self, name: &str) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|event| &*event.event == name)
            .collect()
    }
}

impl LoggerPort for MemoryLogger {
    fn log(&self, mut event: LogEvent) {
        if !self.base_fields.is_empty() {
            let mut fields = self.base_fields.clone();
            fields.extend(event.fields.take().unwrap_or_default());
            event.fields = Some(fields);
        }
        self.events.lock().expect("memory logger lock").push(event);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            events: Arc::clone(&self.events),
            base_fields: merged,
        })
    }
}

#[derive(Debug, Default)]
struct CloudLogsState {
    create_calls: Vec<CreateLogStreamRequest>,
    put_calls: Vec<PutLogEventsRequest>,
    create_failures: VecDeque<ErrorEnvelope>,
    put_failures: VecDeque<ErrorEnvelope>,
    issued_tokens: u64,
}

/// In-memory CloudWatch Logs backend.
///
/// Records every request. Each successful append returns `token-<n>`, where
/// `n` counts successful appends across all streams, unless tokens are
/// disabled. Failures queued with [`Self::fail_next_create`] and
/// [`Self::fail_next_put`] are returned in order, one per call.
#[derive(Debug, Default)]
pub struct InMemoryCloudLogs {
    state: tokio::sync::Mutex<CloudLogsState>,
    issue_tokens: bool,
}

impl InMemoryCloudLogs {
    /// Backend issuing sequence tokens.
    pub fn new() -> Self {
        Self {
            state: tokio::sync::Mutex::default(),
            issue_tokens: true,
        }
    }

    /// Backend whose appends never return a next token.
    pub fn without_sequence_tokens() -> Self {
        Self::default()
    }

    /// Make the next create call fail with `error`.
    pub async fn fail_next_create(&self, error: ErrorEnvelope) {
        self.state.lock().await.create_failures.push_back(error);
    }

    /// Make the next append fail with `error`.
    pub async fn fail_next_put(&self, error: ErrorEnvelope) {
        self.state.lock().await.put_failures.push_back(error);
    }

    /// Create requests received so far, including failed ones.
    pub async fn create_calls(&self) -> Vec<CreateLogStreamRequest> {
        self.state.lock().await.create_calls.clone()
    }

    /// Append requests received so far, including failed ones.
    pub async fn put_calls(&self) -> Vec<PutLogEventsRequest> {
        self.state.lock().await.put_calls.clone()
    }
}

impl CloudLogsPort for InMemoryCloudLogs {
    fn create_log_stream(&self, request: CreateLogStreamRequest) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.create_calls.push(request);
            state.create_failures.pop_front().map_or(Ok(()), Err)
        })
    }

    fn put_log_events(
        &self,
        request: PutLogEventsRequest,
    ) -> BoxFuture<'_, Result<PutLogEventsOutput>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.put_calls.push(request);
            if let Some(error) = state.put_failures.pop_front() {
                return Err(error);
            }
            if !self.issue_tokens {
                return Ok(PutLogEventsOutput::default());
            }
            state.issued_tokens += 1;
            Ok(PutLogEventsOutput {
                next_sequence_token: Some(SequenceToken::new(format!(
                    "token-{}",
                    state.issued_tokens
                ))),
            })
        })
    }
}
