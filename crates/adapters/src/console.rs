//! Console log delegate.

use crate::log_sink::StdoutLogSink;
use postlogs_ports::{BoxFuture, LogDelegate, LogRecord, LogSink, LoggerName};
use postlogs_shared::Result;
use std::sync::Arc;

/// Writes each record as `<loggerName>: <message> <record json>` to a sink.
///
/// Never fails.
#[derive(Clone)]
pub struct ConsoleLogDelegate {
    logger_name: LoggerName,
    sink: Arc<dyn LogSink>,
}

impl ConsoleLogDelegate {
    /// Console delegate writing to stdout.
    #[must_use]
    pub fn new(logger_name: LoggerName) -> Self {
        Self::with_sink(logger_name, Arc::new(StdoutLogSink))
    }

    /// Console delegate writing to an explicit sink.
    #[must_use]
    pub fn with_sink(logger_name: LoggerName, sink: Arc<dyn LogSink>) -> Self {
        Self { logger_name, sink }
    }

    /// Name used as the line prefix.
    #[must_use]
    pub const fn logger_name(&self) -> &LoggerName {
        &self.logger_name
    }

    fn format_line(&self, record: &LogRecord) -> String {
        let structured = serde_json::to_string(record).unwrap_or_default();
        format!(
            "{}: {} {structured}\n",
            self.logger_name, record.message
        )
    }
}

impl LogDelegate for ConsoleLogDelegate {
    fn log<'a>(&'a self, records: &'a [LogRecord]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            for record in records {
                self.sink.write_line(&self.format_line(record));
            }
            Ok(())
        })
    }
}
