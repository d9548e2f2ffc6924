//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service ends in an [`AppError`]. The variant
//! decides how the failure is reported:
//!
//! - **Validation** - bad user input; the message is shown verbatim with `400`
//! - **NotFound** - unknown shortlink; `404`
//! - **Storage** - the shortlink store failed; logged, generic `500`
//! - **Upstream** - the news provider failed; logged, generic `500`

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::query::ValidationError;
use crate::domain::repositories::StoreError;
use crate::render;

/// Message shown to clients for server-side failures.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again later.";

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Upstream,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Storage { message: String, details: Value },
    #[error("{message}")]
    Upstream { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Storage { .. } => ErrorKind::Storage,
            AppError::Upstream { .. } => ErrorKind::Upstream,
        }
    }

    /// Whether the failure is the server's fault and should be logged as such.
    pub fn is_server_fault(&self) -> bool {
        matches!(self.kind(), ErrorKind::Storage | ErrorKind::Upstream)
    }

    /// The message that may be shown to the client.
    ///
    /// Server faults never leak their internal message.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation { message } | AppError::NotFound { message } => message,
            AppError::Storage { .. } | AppError::Upstream { .. } => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::bad_request(e.message())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::storage("Shortlink store failure", json!({ "reason": e.to_string() }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Storage | ErrorKind::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            AppError::Storage { message, details } | AppError::Upstream { message, details } => {
                tracing::error!(kind = ?self.kind(), details = %details, "{}", message);
            }
            _ => {}
        }

        let body = render::format_message(self.public_message(), false);

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts_verbatim() {
        let err: AppError = ValidationError::new("xx is not a valid country to query.").into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "xx is not a valid country to query.");
        assert_eq!(err.public_message(), "xx is not a valid country to query.");
        assert!(!err.is_server_fault());
    }

    #[test]
    fn test_store_error_hides_details() {
        let err: AppError = StoreError::Connection("refused".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.is_server_fault());
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
        assert!(!err.public_message().contains("refused"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("gone").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::storage("down", json!({})).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::upstream("rate limited", json!({}))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
