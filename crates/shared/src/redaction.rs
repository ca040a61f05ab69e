//! Secret detection and redaction for diagnostic output.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key/variable name likely refers to a secret.
///
/// # Examples
///
/// ```
/// use postlogs_shared::is_secret_key;
///
/// assert!(is_secret_key("AWS_SECRET_ACCESS_KEY"));
/// assert!(is_secret_key("sessionToken"));
/// assert!(!is_secret_key("logGroupName"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
}

/// Returns [`REDACTED`] for secret keys, or the original value otherwise.
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}
