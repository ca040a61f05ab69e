//! Log delegate boundary contract and the caller-facing logger handle.

use crate::BoxFuture;
use postlogs_domain::{LogRecord, LoggerName};
use postlogs_shared::Result;
use std::fmt;
use std::sync::Arc;

/// Emits batches of caller records to a backend.
///
/// A batch either succeeds as a whole or the call fails; implementations do
/// not retry and do not report partial progress.
pub trait LogDelegate: Send + Sync {
    /// Emit `records` in the order supplied.
    fn log<'a>(&'a self, records: &'a [LogRecord]) -> BoxFuture<'a, Result<()>>;
}

/// Logger returned by the factory: a name plus the delegate chosen for it.
#[derive(Clone)]
pub struct LoggerHandle {
    logger_name: LoggerName,
    log: Arc<dyn LogDelegate>,
}

impl LoggerHandle {
    /// Wrap a delegate under a logger name.
    #[must_use]
    pub fn new(logger_name: LoggerName, log: Arc<dyn LogDelegate>) -> Self {
        Self { logger_name, log }
    }

    /// Name this logger was created with.
    #[must_use]
    pub const fn logger_name(&self) -> &LoggerName {
        &self.logger_name
    }

    /// Emit a batch through the delegate.
    pub async fn log(&self, records: &[LogRecord]) -> Result<()> {
        self.log.log(records).await
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggerHandle")
            .field("logger_name", &self.logger_name)
            .finish_non_exhaustive()
    }
}
