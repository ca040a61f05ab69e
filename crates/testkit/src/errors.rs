//! Test fixtures for shared error codes and envelopes.

use postlogs_ports::{RESOURCE_ALREADY_EXISTS, cloud_logs_service_error};
use postlogs_shared::{ErrorClass, ErrorEnvelope};

/// The backend's "stream already exists" failure.
pub fn resource_already_exists_error() -> ErrorEnvelope {
    cloud_logs_service_error(
        RESOURCE_ALREADY_EXISTS,
        "The specified log stream already exists",
        ErrorClass::NonRetriable,
    )
}

/// A non-retriable backend failure with the given error type.
pub fn cloud_logs_error(error_type: &str) -> ErrorEnvelope {
    cloud_logs_service_error(error_type, "Some other error", ErrorClass::NonRetriable)
}
