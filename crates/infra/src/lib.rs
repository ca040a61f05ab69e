//! # postlogs-infra
//!
//! Runtime composition: picks a log delegate per logger and wires the
//! CloudWatch client and diagnostics logger from the environment.
//! This crate depends on `adapters`, `config`, `ports`, and `shared`.

/// Logger construction.
mod logger_factory;

pub use logger_factory::{
    LoggerFactory, build_cloudwatch_port, build_diagnostics_logger, create_logger,
};

pub use postlogs_ports::{LogRecord, LoggerHandle};
pub use postlogs_shared::ErrorEnvelope;

/// Infra-level error type (shared error envelope).
pub type InfraError = ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
