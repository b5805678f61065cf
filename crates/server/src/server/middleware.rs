//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, and response compression.

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Response},
    Router,
};
use common::ServiceError;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::ApiError;

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wrap `router` in the shared middleware stack. Requests exceeding
/// `request_timeout` are answered with a JSON `408 Request Timeout`.
pub fn apply<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(map_response(timeout_as_json))
        .layer(CompressionLayer::new())
}

/// `TimeoutLayer` answers with an empty body; give it the usual error shape.
async fn timeout_as_json(resp: Response) -> Response {
    if resp.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError(ServiceError::Timeout).into_response();
    }
    resp
}
