//! Error taxonomy mapping.
//!
//! Deterministic translation of every [`StateApiError`] kind into an
//! HTTP status, a reason phrase, and the `{"message": ...}` body text.
//! Hyper does not write custom status-line reasons, so the reason
//! travels as data: it is logged for every failed request and asserted
//! in tests, while the wire carries status + body.

use axum::http::StatusCode;
use stategate_backend::StateApiError;

/// A fully mapped error, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedError {
    pub status: StatusCode,
    pub reason: String,
    pub message: String,
}

/// Map an error kind to its HTTP shape. The message is the error's
/// `Display` text.
pub fn map_error(err: &StateApiError) -> MappedError {
    let (status, reason) = match err {
        StateApiError::UnknownMaster => {
            (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable".to_string())
        }
        StateApiError::NotMaster { .. } => {
            (StatusCode::TEMPORARY_REDIRECT, "Temporary Redirect".to_string())
        }
        StateApiError::NoSuchResource { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        StateApiError::InvalidContent { .. } => (
            StatusCode::BAD_REQUEST,
            "Content of HTTP request had invalid data".to_string(),
        ),
        StateApiError::InvalidOptionValue { option, value, .. } => (
            StatusCode::BAD_REQUEST,
            format!("Option '{option}' have invalid value '{value}'"),
        ),
        StateApiError::OperationNotSupported { .. } => (
            StatusCode::METHOD_NOT_ALLOWED,
            "Operation not supported for resource".to_string(),
        ),
        StateApiError::DeadlineExceeded { .. } => {
            (StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout".to_string())
        }
        StateApiError::InternalFailure { .. } | StateApiError::Other { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to process request".to_string(),
        ),
    };
    MappedError {
        status,
        reason,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_master_is_service_unavailable() {
        let mapped = map_error(&StateApiError::UnknownMaster);
        assert_eq!(mapped.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(mapped.reason, "Service Unavailable");
        assert_eq!(
            mapped.message,
            "No known master cluster controller currently exists."
        );
    }

    #[test]
    fn not_master_is_temporary_redirect() {
        let mapped = map_error(&StateApiError::NotMaster {
            host: "example.com".to_string(),
            port: 80,
        });
        assert_eq!(mapped.status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(mapped.reason, "Temporary Redirect");
        assert_eq!(
            mapped.message,
            "Cluster controller not master. Use master at example.com:80."
        );
    }

    #[test]
    fn missing_resource_reason_is_the_message() {
        let mapped = map_error(&StateApiError::NoSuchResource {
            path: "foo/1234".to_string(),
        });
        assert_eq!(mapped.status, StatusCode::NOT_FOUND);
        assert_eq!(mapped.reason, "No such resource 'foo/1234'.");
        assert_eq!(mapped.message, mapped.reason);
    }

    #[test]
    fn invalid_content_keeps_detail_as_message() {
        let mapped = map_error(&StateApiError::InvalidContent {
            detail: "Foo bar".to_string(),
        });
        assert_eq!(mapped.status, StatusCode::BAD_REQUEST);
        assert_eq!(mapped.reason, "Content of HTTP request had invalid data");
        assert_eq!(mapped.message, "Foo bar");
    }

    #[test]
    fn invalid_option_reason_drops_detail() {
        let mapped = map_error(&StateApiError::InvalidOptionValue {
            option: "foo".to_string(),
            value: "bar".to_string(),
            detail: "Foo can not be bar".to_string(),
        });
        assert_eq!(mapped.status, StatusCode::BAD_REQUEST);
        assert_eq!(mapped.reason, "Option 'foo' have invalid value 'bar'");
        assert_eq!(
            mapped.message,
            "Option 'foo' have invalid value 'bar': Foo can not be bar"
        );
    }

    #[test]
    fn unsupported_operation_is_405() {
        let mapped = map_error(&StateApiError::OperationNotSupported {
            path: "foo".to_string(),
            detail: "Foo".to_string(),
        });
        assert_eq!(mapped.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(mapped.reason, "Operation not supported for resource");
        assert_eq!(mapped.message, "[foo]: Foo");
    }

    #[test]
    fn deadline_exceeded_is_gateway_timeout() {
        let mapped = map_error(&StateApiError::DeadlineExceeded {
            detail: "argh!".to_string(),
        });
        assert_eq!(mapped.status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(mapped.reason, "Gateway Timeout");
        assert_eq!(mapped.message, "argh!");
    }

    #[test]
    fn internal_and_uncategorized_degrade_to_500() {
        let internal = map_error(&StateApiError::InternalFailure {
            detail: "Foo".to_string(),
        });
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.reason, "Failed to process request");
        assert_eq!(internal.message, "Internal failure. Should not happen: Foo");

        let other = map_error(&StateApiError::Other {
            kind: "std::io::Error".to_string(),
            detail: "Moahaha".to_string(),
        });
        assert_eq!(other.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(other.reason, "Failed to process request");
        assert_eq!(other.message, "std::io::Error: Moahaha");
    }
}
