//! # postlogs-ports
//!
//! Port traits for the postlogs hexagonal architecture.
//!
//! This crate defines the seams between the logger factory and the
//! backends it drives. It depends only on `domain` and `shared`.

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by port traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod cloud_logs;
pub mod delegate;
pub mod logger;
pub mod sink;

pub use cloud_logs::*;
pub use delegate::*;
pub use logger::*;
pub use sink::*;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `postlogs-domain`.
pub use postlogs_domain::{LogGroupName, LogRecord, LogStreamName, LoggerName};
