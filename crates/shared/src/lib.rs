//! # postlogs-shared
//!
//! Shared result types and error handling for the postlogs workspace.
//!
//! - [`ErrorEnvelope`]: the one error type every fallible operation returns
//! - [`Result`]: alias defaulting the error to [`ErrorEnvelope`]
//! - redaction helpers for diagnostic output
//!
//! This crate only depends on external crates.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod redaction;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use redaction::{REDACTED, is_secret_key, redact_if_secret};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
