//! Environment variable parsing.
//!
//! Parsing is strict: a variable that is present but blank or unparsable
//! fails instead of silently falling back to a default.

use postlogs_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Env var: AWS region for the CloudWatch client.
pub const ENV_AWS_REGION: &str = "POSTLOGS_AWS_REGION";
/// Env var: AWS region (alias, set by the Lambda runtime).
pub const ENV_AWS_REGION_ALIAS: &str = "AWS_REGION";
/// Env var: CloudWatch Logs endpoint override.
pub const ENV_CLOUDWATCH_ENDPOINT_URL: &str = "POSTLOGS_CLOUDWATCH_ENDPOINT_URL";
/// Env var: minimum diagnostics level.
pub const ENV_DIAGNOSTICS_LEVEL: &str = "POSTLOGS_DIAGNOSTICS_LEVEL";
/// Env var: diagnostics output stream.
pub const ENV_DIAGNOSTICS_STREAM: &str = "POSTLOGS_DIAGNOSTICS_STREAM";

const ALL_VARS: &[&str] = &[
    ENV_AWS_REGION,
    ENV_AWS_REGION_ALIAS,
    ENV_CLOUDWATCH_ENDPOINT_URL,
    ENV_DIAGNOSTICS_LEVEL,
    ENV_DIAGNOSTICS_STREAM,
];

/// Minimum level for factory diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiagnosticsLevel {
    /// Debug and above.
    Debug,
    /// Info and above.
    #[default]
    Info,
    /// Warn and above.
    Warn,
    /// Errors only.
    Error,
}

/// Output stream for factory diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiagnosticsStream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

/// Typed settings read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingEnv {
    /// Region override for the CloudWatch client.
    pub aws_region: Option<Box<str>>,
    /// Endpoint override for the CloudWatch client.
    pub cloudwatch_endpoint_url: Option<Box<str>>,
    /// Minimum diagnostics level.
    pub diagnostics_level: DiagnosticsLevel,
    /// Diagnostics output stream.
    pub diagnostics_stream: DiagnosticsStream,
}

impl LoggingEnv {
    /// Parse settings from an explicit map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            aws_region: parse_optional_trimmed_string_any(
                map,
                &[ENV_AWS_REGION, ENV_AWS_REGION_ALIAS],
            )?,
            cloudwatch_endpoint_url: parse_optional_url_string(map, ENV_CLOUDWATCH_ENDPOINT_URL)?,
            diagnostics_level: parse_optional_level(map, ENV_DIAGNOSTICS_LEVEL)?
                .unwrap_or_default(),
            diagnostics_stream: parse_optional_stream(map, ENV_DIAGNOSTICS_STREAM)?
                .unwrap_or_default(),
        })
    }

    /// Parse settings from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ALL_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// Variable is set but blank.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Variable is not a valid URL.
    InvalidUrl {
        /// Env var name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// Variable is not one of the accepted values.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidUrl { .. } => ErrorCode::new("config", "invalid_env_url"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidUrl { var, .. } => write!(formatter, "{var} must be a valid URL"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidUrl { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redact_if_secret(var, &value))
            },
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_trimmed_string_any(
    map: &BTreeMap<String, String>,
    vars: &[&'static str],
) -> Result<Option<Box<str>>, EnvParseError> {
    for var in vars {
        if map.contains_key(*var) {
            return parse_optional_trimmed_string(map, var);
        }
    }
    Ok(None)
}

fn parse_optional_url_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(value) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    Url::parse(&value).map_err(|_| EnvParseError::InvalidUrl {
        var,
        value: value.to_string(),
    })?;
    Ok(Some(value))
}

fn parse_optional_level(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<DiagnosticsLevel>, EnvParseError> {
    let Some(value) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    let level = match value.to_ascii_lowercase().as_str() {
        "debug" => DiagnosticsLevel::Debug,
        "info" => DiagnosticsLevel::Info,
        "warn" | "warning" => DiagnosticsLevel::Warn,
        "error" => DiagnosticsLevel::Error,
        _ => {
            return Err(EnvParseError::InvalidEnum {
                var,
                value: value.to_string(),
            });
        },
    };
    Ok(Some(level))
}

fn parse_optional_stream(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<DiagnosticsStream>, EnvParseError> {
    let Some(value) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    let stream = match value.to_ascii_lowercase().as_str() {
        "stdout" => DiagnosticsStream::Stdout,
        "stderr" => DiagnosticsStream::Stderr,
        _ => {
            return Err(EnvParseError::InvalidEnum {
                var,
                value: value.to_string(),
            });
        },
    };
    Ok(Some(stream))
}
