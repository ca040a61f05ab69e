//! CloudWatch delegate behaviour against the in-memory backend.

use postlogs_adapters::CloudLogDelegate;
use postlogs_ports::{
    CloudLogsPort, LogDelegate, LogGroupName, LogRecord, LoggerName, SequenceToken,
};
use postlogs_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use postlogs_testkit::InMemoryCloudLogs;
use postlogs_testkit::errors::{cloud_logs_error, resource_already_exists_error};
use std::sync::Arc;

fn names() -> Result<(LoggerName, LogGroupName)> {
    Ok((
        LoggerName::parse("testLoggerName").map_err(ErrorEnvelope::from)?,
        LogGroupName::parse("testLogGroupName").map_err(ErrorEnvelope::from)?,
    ))
}

async fn delegate(port: &Arc<InMemoryCloudLogs>) -> Result<CloudLogDelegate> {
    let (logger_name, log_group) = names()?;
    let port: Arc<dyn CloudLogsPort> = port.clone();
    CloudLogDelegate::create(&logger_name, log_group, port).await
}

#[tokio::test]
async fn creates_exactly_one_uniquely_named_stream() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let cloud = delegate(&port).await?;

    let creates = port.create_calls().await;
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].log_group.as_str(), "testLogGroupName");
    assert_eq!(&creates[0].log_stream, cloud.log_stream());
    assert!(cloud.log_stream().as_str().starts_with("testLoggerName-"));
    assert!(port.put_calls().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn two_delegates_never_share_a_stream() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let first = delegate(&port).await?;
    let second = delegate(&port).await?;
    assert_ne!(first.log_stream(), second.log_stream());
    Ok(())
}

#[tokio::test]
async fn already_existing_stream_is_accepted() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    port.fail_next_create(resource_already_exists_error()).await;

    let cloud = delegate(&port).await?;
    cloud.log(&[LogRecord::new(265_473, "after exists")]).await?;

    assert_eq!(port.create_calls().await.len(), 1);
    assert_eq!(port.put_calls().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn other_create_errors_propagate_unchanged() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let injected = cloud_logs_error("SomeOtherException");
    port.fail_next_create(injected.clone()).await;

    let Err(error) = delegate(&port).await else {
        panic!("expected create to fail");
    };
    assert_eq!(error, injected);
    assert_eq!(error.code.code(), "SomeOtherException");
    assert!(port.put_calls().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn successive_puts_chain_sequence_tokens() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let cloud = delegate(&port).await?;

    cloud
        .log(&[LogRecord::new(265_473, "test log message to cloudwatch")])
        .await?;
    assert_eq!(
        cloud.sequence_token().await,
        Some(SequenceToken::new("token-1"))
    );
    cloud
        .log(&[LogRecord::new(265_474, "second message")])
        .await?;

    let puts = port.put_calls().await;
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[0].sequence_token, None);
    assert_eq!(puts[0].log_group.as_str(), "testLogGroupName");
    assert_eq!(&puts[0].log_stream, cloud.log_stream());
    assert_eq!(puts[0].events.len(), 1);
    assert_eq!(puts[0].events[0].timestamp_ms, 265_473);
    assert_eq!(&*puts[0].events[0].message, "test log message to cloudwatch");
    assert_eq!(puts[1].sequence_token, Some(SequenceToken::new("token-1")));
    Ok(())
}

#[tokio::test]
async fn batch_order_is_preserved() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let cloud = delegate(&port).await?;

    cloud
        .log(&[
            LogRecord::new(3, "third"),
            LogRecord::new(1, "first"),
            LogRecord::new(2, "second"),
        ])
        .await?;

    let puts = port.put_calls().await;
    let messages: Vec<&str> = puts[0]
        .events
        .iter()
        .map(|event| &*event.message)
        .collect();
    assert_eq!(messages, vec!["third", "first", "second"]);
    Ok(())
}

#[tokio::test]
async fn empty_batch_sends_nothing() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let cloud = delegate(&port).await?;

    cloud.log(&[]).await?;

    assert!(port.put_calls().await.is_empty());
    assert_eq!(cloud.sequence_token().await, None);
    Ok(())
}

#[tokio::test]
async fn failed_put_keeps_previous_token() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let cloud = delegate(&port).await?;

    cloud.log(&[LogRecord::new(1, "first")]).await?;
    let injected = cloud_logs_error("InvalidSequenceTokenException");
    port.fail_next_put(injected.clone()).await;

    let Err(error) = cloud.log(&[LogRecord::new(2, "second")]).await else {
        panic!("expected put to fail");
    };
    assert_eq!(error, injected);
    assert_eq!(
        cloud.sequence_token().await,
        Some(SequenceToken::new("token-1"))
    );

    cloud.log(&[LogRecord::new(3, "third")]).await?;
    let puts = port.put_calls().await;
    assert_eq!(puts[2].sequence_token, Some(SequenceToken::new("token-1")));
    Ok(())
}

#[tokio::test]
async fn missing_next_token_clears_the_stored_one() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::without_sequence_tokens());
    let cloud = delegate(&port).await?;

    cloud.log(&[LogRecord::new(1, "first")]).await?;
    cloud.log(&[LogRecord::new(2, "second")]).await?;

    assert_eq!(cloud.sequence_token().await, None);
    let puts = port.put_calls().await;
    assert!(puts.iter().all(|put| put.sequence_token.is_none()));
    Ok(())
}

#[tokio::test]
async fn concurrent_puts_are_serialised() -> Result<()> {
    let port = Arc::new(InMemoryCloudLogs::new());
    let cloud = Arc::new(delegate(&port).await?);

    let mut handles = Vec::new();
    for index in 0..8_i64 {
        let cloud = Arc::clone(&cloud);
        handles.push(tokio::spawn(async move {
            cloud
                .log(&[LogRecord::new(index, format!("message {index}"))])
                .await
        }));
    }
    for handle in handles {
        handle
            .await
            .map_err(|error| {
                ErrorEnvelope::unexpected(
                    ErrorCode::internal(),
                    error.to_string(),
                    ErrorClass::NonRetriable,
                )
            })??;
    }

    let puts = port.put_calls().await;
    assert_eq!(puts.len(), 8);
    assert_eq!(puts[0].sequence_token, None);
    for (index, put) in puts.iter().enumerate().skip(1) {
        assert_eq!(
            put.sequence_token,
            Some(SequenceToken::new(format!("token-{index}")))
        );
    }
    Ok(())
}
