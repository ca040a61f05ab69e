//! Line output boundary contract.

/// A sink that receives pre-formatted log lines.
///
/// Lines carry their own trailing newline. Writes are best-effort: a sink
/// never reports failure back to the logger.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink.
    fn write_line(&self, line: &str);
}
