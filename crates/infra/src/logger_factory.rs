//! Log delegate selection and initialization.

use crate::InfraResult;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatchlogs::Client;
use postlogs_adapters::{
    CloudLogDelegate, CloudWatchLogs, ConsoleLogDelegate, JsonLogger, StderrLogSink,
    StdoutLogSink,
};
use postlogs_config::{DiagnosticsLevel, DiagnosticsStream, EnvParseError, LoggingEnv};
use postlogs_ports::{
    CloudLogsPort, LogEvent, LogGroupName, LogLevel, LogSink, LoggerHandle, LoggerName,
    LoggerPort, log_fields,
};
use postlogs_shared::ErrorEnvelope;
use std::sync::Arc;
use tokio::sync::OnceCell;

const CONSOLE_INITIALISED: &str = "logger.console_initialised";
const CLOUDWATCH_INITIALISED: &str = "logger.cloudwatch_initialised";
const ENV_REJECTED: &str = "logger.env_rejected";

static ENV_FACTORY: OnceCell<LoggerFactory> = OnceCell::const_new();

/// Builds logger handles, choosing console or CloudWatch output per logger.
#[derive(Clone)]
pub struct LoggerFactory {
    cloud_logs: Arc<dyn CloudLogsPort>,
    diagnostics: Arc<dyn LoggerPort>,
    console_sink: Arc<dyn LogSink>,
}

impl LoggerFactory {
    /// Factory over an explicit backend and diagnostics logger. Console
    /// delegates write to stdout.
    #[must_use]
    pub fn new(cloud_logs: Arc<dyn CloudLogsPort>, diagnostics: Arc<dyn LoggerPort>) -> Self {
        Self {
            cloud_logs,
            diagnostics,
            console_sink: Arc::new(StdoutLogSink),
        }
    }

    /// Route console delegates to `sink` instead of stdout.
    #[must_use]
    pub fn with_console_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.console_sink = sink;
        self
    }

    /// Factory wired from environment settings: a CloudWatch client from the
    /// default AWS provider chain and a JSON diagnostics logger.
    pub async fn from_env(env: &LoggingEnv) -> Self {
        let cloud_logs = build_cloudwatch_port(env).await;
        let diagnostics = build_diagnostics_logger(env);
        Self::new(cloud_logs, diagnostics)
    }

    /// Factory wired from an env parse result. An unusable environment falls
    /// back to the defaults and is reported as a warn diagnostic.
    pub async fn from_env_or_default(parsed: Result<LoggingEnv, EnvParseError>) -> Self {
        match parsed {
            Ok(env) => Self::from_env(&env).await,
            Err(error) => {
                let factory = Self::from_env(&LoggingEnv::default()).await;
                factory.report_rejected_env(error);
                factory
            },
        }
    }

    fn report_rejected_env(&self, error: EnvParseError) {
        let envelope = ErrorEnvelope::from(error);
        let event = LogEvent::new(
            LogLevel::Warn,
            ENV_REJECTED,
            "Ignoring invalid logging environment, using defaults",
            Some(log_fields([("code", envelope.code.to_string().as_str())])),
        );
        let event = match serde_json::to_value(&envelope) {
            Ok(payload) => event.with_error(payload),
            Err(_) => event,
        };
        self.diagnostics.log(event);
    }

    /// Build a logger named `logger_name`.
    ///
    /// Without a log group (absent or blank) records go to the console.
    /// With one, a fresh stream is created in that group and records are
    /// appended to it. A failure creating the stream is returned unchanged.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn create_logger(
        &self,
        logger_name: &str,
        log_group: Option<&str>,
    ) -> InfraResult<LoggerHandle> {
        let logger_name = LoggerName::parse(logger_name)?;

        let Some(log_group) = LogGroupName::parse_optional(log_group) else {
            let delegate =
                ConsoleLogDelegate::with_sink(logger_name.clone(), Arc::clone(&self.console_sink));
            self.diagnostics.info(
                CONSOLE_INITIALISED,
                "Initialised console logging",
                Some(log_fields([("loggerName", logger_name.as_str())])),
            );
            return Ok(LoggerHandle::new(logger_name, Arc::new(delegate)));
        };

        let delegate =
            CloudLogDelegate::create(&logger_name, log_group, Arc::clone(&self.cloud_logs))
                .await?;
        self.diagnostics.info(
            CLOUDWATCH_INITIALISED,
            "Initialised Custom CloudWatch logging",
            Some(log_fields([
                ("loggerName", logger_name.as_str()),
                ("logGroupName", delegate.log_group().as_str()),
                ("logStreamName", delegate.log_stream().as_str()),
            ])),
        );
        Ok(LoggerHandle::new(logger_name, Arc::new(delegate)))
    }
}

/// Build a logger using a factory wired from the process environment.
///
/// The factory is built on first use and shared afterwards. An invalid
/// environment never fails the call; see [`LoggerFactory::from_env_or_default`].
pub async fn create_logger(
    logger_name: &str,
    log_group: Option<&str>,
) -> InfraResult<LoggerHandle> {
    let factory = ENV_FACTORY
        .get_or_init(|| LoggerFactory::from_env_or_default(LoggingEnv::from_std_env()))
        .await;
    factory.create_logger(logger_name, log_group).await
}

/// Build the CloudWatch Logs port from the default AWS provider chain plus
/// the region and endpoint overrides in `env`.
pub async fn build_cloudwatch_port(env: &LoggingEnv) -> Arc<dyn CloudLogsPort> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = env.aws_region.as_deref() {
        loader = loader.region(Region::new(region.to_owned()));
    }
    if let Some(endpoint) = env.cloudwatch_endpoint_url.as_deref() {
        loader = loader.endpoint_url(endpoint);
    }
    let shared = loader.load().await;
    Arc::new(CloudWatchLogs::new(Client::new(&shared)))
}

/// Build the JSON diagnostics logger described by `env`.
#[must_use]
pub fn build_diagnostics_logger(env: &LoggingEnv) -> Arc<dyn LoggerPort> {
    let sink: Arc<dyn LogSink> = match env.diagnostics_stream {
        DiagnosticsStream::Stdout => Arc::new(StdoutLogSink),
        DiagnosticsStream::Stderr => Arc::new(StderrLogSink),
    };
    Arc::new(JsonLogger::new(sink).with_min_level(diagnostics_level(env.diagnostics_level)))
}

const fn diagnostics_level(level: DiagnosticsLevel) -> LogLevel {
    match level {
        DiagnosticsLevel::Debug => LogLevel::Debug,
        DiagnosticsLevel::Info => LogLevel::Info,
        DiagnosticsLevel::Warn => LogLevel::Warn,
        DiagnosticsLevel::Error => LogLevel::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postlogs_config::ENV_DIAGNOSTICS_LEVEL;
    use postlogs_testkit::{InMemoryCloudLogs, MemoryLogger};

    #[test]
    fn diagnostics_levels_map_one_to_one() {
        assert_eq!(diagnostics_level(DiagnosticsLevel::Debug), LogLevel::Debug);
        assert_eq!(diagnostics_level(DiagnosticsLevel::Info), LogLevel::Info);
        assert_eq!(diagnostics_level(DiagnosticsLevel::Warn), LogLevel::Warn);
        assert_eq!(diagnostics_level(DiagnosticsLevel::Error), LogLevel::Error);
    }

    #[tokio::test]
    async fn env_factory_builds_without_touching_the_network() {
        let env = LoggingEnv {
            aws_region: Some("us-east-1".into()),
            cloudwatch_endpoint_url: Some("http://127.0.0.1:1".into()),
            ..LoggingEnv::default()
        };
        let factory = LoggerFactory::from_env(&env).await;
        let handle = factory.create_logger("envLogger", None).await;
        assert!(handle.is_ok());
    }

    #[test]
    fn rejected_env_is_reported_as_a_warning() {
        let diagnostics = MemoryLogger::default();
        let factory = LoggerFactory::new(
            Arc::new(InMemoryCloudLogs::new()),
            Arc::new(diagnostics.clone()),
        );

        factory.report_rejected_env(EnvParseError::InvalidEnum {
            var: ENV_DIAGNOSTICS_LEVEL,
            value: "trace".to_string(),
        });

        let events = diagnostics.events_named(ENV_REJECTED);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, LogLevel::Warn);
        let error = events[0].error.as_ref().map(|error| error["code"].clone());
        assert_eq!(
            error,
            Some(serde_json::json!({ "namespace": "config", "code": "invalid_env_enum" }))
        );
    }
}
