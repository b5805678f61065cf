//! Request and response bodies exchanged over the public HTTP(S) API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User endpoint
// ---------------------------------------------------------------------------

/// Demo user record served by `GET /user` and accepted by `POST /user`.
///
/// Missing fields in a `POST` body fall back to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    /// The fixed record returned by `GET /user`.
    pub fn demo() -> Self {
        Self {
            id: 1,
            name: "John Doe".into(),
            email: "john.doe@example.com".into(),
        }
    }
}

/// Body of a successful `POST /user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// FIPS mode
// ---------------------------------------------------------------------------

/// Response body for `GET /fips-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FipsStatus {
    /// Whether the host enforces FIPS-approved cryptography.
    pub fips_mode: bool,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.public_message())
    }
}
