//! Unique log stream naming.
//!
//! Every delegate writes to its own stream so concurrent invocations never
//! contend for a sequence token. Names follow
//! `<base>-<YYYY-MM-DD>-<32 lowercase hex>`, where the date is the UTC day
//! and the suffix is a random v4 UUID in simple form.

use crate::LogStreamName;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Generate a fresh stream name for `base_name`.
pub fn unique_log_stream_name(base_name: &str) -> LogStreamName {
    log_stream_name_for(base_name, Utc::now().date_naive(), Uuid::new_v4())
}

/// Build a stream name from explicit parts.
pub fn log_stream_name_for(base_name: &str, date: NaiveDate, suffix: Uuid) -> LogStreamName {
    let name = format!(
        "{base_name}-{}-{}",
        date.format("%Y-%m-%d"),
        suffix.simple()
    );
    LogStreamName::from_generated(name.into_boxed_str())
}
