//! # postlogs-domain
//!
//! Domain values for the postlogs logging delegates:
//!
//! - **Records** - [`LogRecord`], the unit every delegate emits
//! - **Names** - [`LoggerName`], [`LogGroupName`], [`LogStreamName`]
//! - **Stream naming** - [`unique_log_stream_name`]
//!
//! ## Dependency Rules
//!
//! - Depends only on the `shared` crate
//! - No I/O beyond reading the clock and the system entropy source

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use postlogs_shared::shared_crate_version;

pub mod primitives;
pub mod record;
pub mod stream_name;

pub use primitives::{LogGroupName, LogStreamName, LoggerName, PrimitiveError};
pub use record::LogRecord;
pub use stream_name::{log_stream_name_for, unique_log_stream_name};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
