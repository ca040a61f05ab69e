//! # postlogs-adapters
//!
//! Adapter implementations for the postlogs ports: the console and
//! CloudWatch log delegates, the CloudWatch Logs client, and the JSON
//! diagnostics logger.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod cloud;
pub mod cloudwatch;
pub mod console;
pub mod log_sink;
pub mod logger;

pub use cloud::CloudLogDelegate;
pub use cloudwatch::CloudWatchLogs;
pub use console::ConsoleLogDelegate;
pub use log_sink::{StderrLogSink, StdoutLogSink};
pub use logger::JsonLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
