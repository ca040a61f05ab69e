//! # postlogs-config
//!
//! Environment-derived settings for the logging backends: CloudWatch client
//! overrides and where diagnostics go. Which backend a logger uses is never
//! read from here; the log group is always passed to the factory.
//! This crate depends on `shared` only.

/// Environment variable parsing.
pub mod env;

pub use env::{
    DiagnosticsLevel, DiagnosticsStream, ENV_AWS_REGION, ENV_AWS_REGION_ALIAS,
    ENV_CLOUDWATCH_ENDPOINT_URL, ENV_DIAGNOSTICS_LEVEL, ENV_DIAGNOSTICS_STREAM, EnvParseError,
    LoggingEnv,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
