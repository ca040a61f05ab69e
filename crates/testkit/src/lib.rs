//! # postlogs-testkit
//!
//! Test helpers and in-memory adapters.
//! This crate depends on `ports` and `shared`.

pub mod errors;
pub mod in_memory;

pub use in_memory::{InMemoryCloudLogs, MemoryLogSink, MemoryLogger, NoopLogger};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
