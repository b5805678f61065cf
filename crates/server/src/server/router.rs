//! Axum router construction.

use std::time::Duration;

use axum::{routing::get, Router};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// Known paths answer unsupported methods with `405`; unknown paths with `404`.
/// `HEAD` is rejected explicitly since axum would otherwise serve it with the
/// `GET` handler.
pub fn build(state: AppState, request_timeout: Duration) -> Router {
    let routes = Router::new()
        .route(
            "/user",
            get(handlers::get_user)
                .head(handlers::method_not_allowed)
                .post(handlers::create_user)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/fips-mode",
            get(handlers::fips_mode)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found);

    middleware::apply(routes, request_timeout).with_state(state)
}
