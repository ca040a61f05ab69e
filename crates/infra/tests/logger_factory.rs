//! Delegate selection tests for the logger factory.

use postlogs_config::{ENV_AWS_REGION, ENV_DIAGNOSTICS_LEVEL, LoggingEnv};
use postlogs_infra::{LogRecord, LoggerFactory, create_logger};
use postlogs_ports::{CloudLogsPort, LoggerPort};
use postlogs_shared::Result;
use postlogs_testkit::errors::{cloud_logs_error, resource_already_exists_error};
use postlogs_testkit::{InMemoryCloudLogs, MemoryLogSink, MemoryLogger};
use std::collections::BTreeMap;
use std::sync::Arc;

const CONSOLE_EVENT: &str = "logger.console_initialised";
const CLOUD_EVENT: &str = "logger.cloudwatch_initialised";

struct Harness {
    factory: LoggerFactory,
    cloud_logs: Arc<InMemoryCloudLogs>,
    diagnostics: MemoryLogger,
    console: Arc<MemoryLogSink>,
}

fn harness() -> Harness {
    let cloud_logs = Arc::new(InMemoryCloudLogs::new());
    let diagnostics = MemoryLogger::default();
    let console = Arc::new(MemoryLogSink::default());

    let port: Arc<dyn CloudLogsPort> = cloud_logs.clone();
    let logger: Arc<dyn LoggerPort> = Arc::new(diagnostics.clone());
    let factory = LoggerFactory::new(port, logger).with_console_sink(console.clone());

    Harness {
        factory,
        cloud_logs,
        diagnostics,
        console,
    }
}

#[tokio::test]
async fn no_log_group_gives_a_console_logger() -> Result<()> {
    let harness = harness();

    let handle = harness
        .factory
        .create_logger("testLoggerName", None)
        .await?;

    assert_eq!(handle.logger_name().as_str(), "testLoggerName");
    let console_events = harness.diagnostics.events_named(CONSOLE_EVENT);
    assert_eq!(console_events.len(), 1);
    assert_eq!(&*console_events[0].message, "Initialised console logging");
    assert!(harness.diagnostics.events_named(CLOUD_EVENT).is_empty());
    assert!(harness.cloud_logs.create_calls().await.is_empty());

    handle
        .log(&[LogRecord::new(347_574, "an example log message")])
        .await?;
    let lines = harness.console.take();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("testLoggerName: an example log message"));
    assert!(harness.cloud_logs.put_calls().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn blank_log_group_falls_back_to_console() -> Result<()> {
    let harness = harness();

    harness.factory.create_logger("testLoggerName", Some("")).await?;
    harness
        .factory
        .create_logger("testLoggerName", Some("   "))
        .await?;

    assert_eq!(harness.diagnostics.events_named(CONSOLE_EVENT).len(), 2);
    assert!(harness.diagnostics.events_named(CLOUD_EVENT).is_empty());
    assert!(harness.cloud_logs.create_calls().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn log_group_gives_a_cloudwatch_logger() -> Result<()> {
    let harness = harness();

    let handle = harness
        .factory
        .create_logger("testLoggerName", Some("testLogGroupName"))
        .await?;

    assert_eq!(handle.logger_name().as_str(), "testLoggerName");
    let cloud_events = harness.diagnostics.events_named(CLOUD_EVENT);
    assert_eq!(cloud_events.len(), 1);
    assert_eq!(
        &*cloud_events[0].message,
        "Initialised Custom CloudWatch logging"
    );
    assert!(harness.diagnostics.events_named(CONSOLE_EVENT).is_empty());

    let creates = harness.cloud_logs.create_calls().await;
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].log_group.as_str(), "testLogGroupName");

    handle
        .log(&[LogRecord::new(265_473, "test log message to cloudwatch")])
        .await?;
    let puts = harness.cloud_logs.put_calls().await;
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].log_stream, creates[0].log_stream);
    assert!(harness.console.take().is_empty());
    Ok(())
}

#[tokio::test]
async fn already_existing_stream_still_yields_a_logger() -> Result<()> {
    let harness = harness();
    harness
        .cloud_logs
        .fail_next_create(resource_already_exists_error())
        .await;

    let handle = harness
        .factory
        .create_logger("testLoggerName", Some("testLogGroupName"))
        .await?;

    assert_eq!(handle.logger_name().as_str(), "testLoggerName");
    assert_eq!(harness.diagnostics.events_named(CLOUD_EVENT).len(), 1);
    Ok(())
}

#[tokio::test]
async fn construction_failure_propagates_without_diagnostics() -> Result<()> {
    let harness = harness();
    let injected = cloud_logs_error("SomeOtherException");
    harness.cloud_logs.fail_next_create(injected.clone()).await;

    let Err(error) = harness
        .factory
        .create_logger("testLoggerName", Some("testLogGroupName"))
        .await
    else {
        panic!("expected construction to fail");
    };

    assert_eq!(error, injected);
    assert_eq!(error.code.code(), "SomeOtherException");
    assert!(harness.diagnostics.events().is_empty());
    Ok(())
}

#[tokio::test]
async fn whitespace_logger_name_is_kept_as_given() -> Result<()> {
    let harness = harness();

    let console = harness.factory.create_logger("   ", None).await?;
    assert_eq!(console.logger_name().as_str(), "   ");

    let cloud = harness
        .factory
        .create_logger("   ", Some("testLogGroupName"))
        .await?;
    assert_eq!(cloud.logger_name().as_str(), "   ");
    assert_eq!(harness.cloud_logs.create_calls().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn empty_logger_name_is_rejected_before_any_backend_call() -> Result<()> {
    let harness = harness();

    let Err(error) = harness
        .factory
        .create_logger("", Some("testLogGroupName"))
        .await
    else {
        panic!("expected empty name to fail");
    };

    assert!(error.code.matches("domain", "invalid_logger_name"));
    assert!(harness.cloud_logs.create_calls().await.is_empty());
    assert!(harness.diagnostics.events().is_empty());
    Ok(())
}

#[tokio::test]
async fn put_failures_reach_the_caller_unchanged() -> Result<()> {
    let harness = harness();
    let handle = harness
        .factory
        .create_logger("testLoggerName", Some("testLogGroupName"))
        .await?;
    let injected = cloud_logs_error("DataAlreadyAcceptedException");
    harness.cloud_logs.fail_next_put(injected.clone()).await;

    let Err(error) = handle.log(&[LogRecord::new(1, "rejected")]).await else {
        panic!("expected put to fail");
    };
    assert_eq!(error, injected);
    Ok(())
}

#[tokio::test]
async fn invalid_env_falls_back_to_defaults_for_console_loggers() -> Result<()> {
    let env: BTreeMap<String, String> = [
        (ENV_DIAGNOSTICS_LEVEL.to_string(), "trace".to_string()),
        (ENV_AWS_REGION.to_string(), "us-east-1".to_string()),
    ]
    .into_iter()
    .collect();
    let parsed = LoggingEnv::from_map(&env);
    assert!(parsed.is_err());

    let factory = LoggerFactory::from_env_or_default(parsed).await;
    let handle = factory.create_logger("testLogger", None).await?;
    assert_eq!(handle.logger_name().as_str(), "testLogger");
    Ok(())
}

#[tokio::test]
async fn env_wired_create_logger_builds_console_loggers() -> Result<()> {
    let handle = create_logger("testLogger", None).await?;
    assert_eq!(handle.logger_name().as_str(), "testLogger");

    let again = create_logger("otherLogger", Some("  ")).await?;
    assert_eq!(again.logger_name().as_str(), "otherLogger");
    Ok(())
}
