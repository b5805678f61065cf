//! Axum request handlers for all service endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{ErrorResponse, FipsStatus, MessageResponse, User},
    ServiceError,
};
use tracing::{info, warn};

use super::state::AppState;

/// [`ServiceError`] rendered as a JSON [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

/// `GET /user`: return the fixed demo user.
pub async fn get_user(State(state): State<AppState>, method: Method, uri: Uri) -> Json<User> {
    info!(
        user_id = state.demo_user.id,
        method = %method,
        path = uri.path(),
        "user info"
    );
    Json(state.demo_user.as_ref().clone())
}

/// `POST /user`: accept a user record. Nothing is stored.
///
/// The body is decoded as JSON whatever the `Content-Type` header says. A body
/// that does not decode as a [`User`] is answered with `400 Bad Request`.
pub async fn create_user(
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let user: User =
        serde_json::from_slice(&body).map_err(|e| ServiceError::BadRequest(e.to_string()))?;

    info!(
        name = %user.name,
        method = %method,
        path = uri.path(),
        "received user"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// `GET /fips-mode`: report whether the host runs in FIPS mode.
pub async fn fips_mode(State(state): State<AppState>, method: Method, uri: Uri) -> Json<FipsStatus> {
    let source = state.fips.detect();
    let fips_mode = source.is_some();

    info!(
        fips_enabled = fips_mode,
        source = source.as_deref().unwrap_or("none"),
        method = %method,
        path = uri.path(),
        "FIPS mode"
    );

    Json(FipsStatus { fips_mode })
}

/// Method fallback for known paths.
pub async fn method_not_allowed() -> ApiError {
    ServiceError::MethodNotAllowed.into()
}

/// Catch-all 404 handler.
pub async fn not_found() -> ApiError {
    ServiceError::NotFound("the requested resource does not exist".into()).into()
}
