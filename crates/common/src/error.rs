//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::MethodNotAllowed`] → 405
/// - [`ServiceError::Timeout`] → 408
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body could not be decoded.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No route matches the requested path.
    #[error("not found: {0}")]
    NotFound(String),

    /// The path exists but does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::MethodNotAllowed => 405,
            ServiceError::Timeout => 408,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code carried in [`crate::protocol::ErrorResponse::code`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::MethodNotAllowed => "method_not_allowed",
            ServiceError::Timeout => "request_timeout",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Human-readable message safe to expose to callers.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::BadRequest(msg) | ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::MethodNotAllowed => "Method not allowed".into(),
            ServiceError::Timeout => "request timed out".into(),
            // Internal details stay in the logs.
            ServiceError::Internal(_) => "internal server error".into(),
        }
    }
}
