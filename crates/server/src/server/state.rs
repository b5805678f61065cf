//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use common::protocol::User;

use crate::fips::FipsDetector;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable so that Axum can clone the state for each
/// request.
#[derive(Clone)]
pub struct AppState {
    /// Evaluated on every `GET /fips-mode`; results are never cached.
    pub fips: FipsDetector,
    /// Record returned by `GET /user`.
    pub demo_user: Arc<User>,
}

impl AppState {
    pub fn new(fips: FipsDetector, demo_user: User) -> Self {
        Self {
            fips,
            demo_user: Arc::new(demo_user),
        }
    }
}

impl Default for AppState {
    /// The system FIPS sources and the standard demo user.
    fn default() -> Self {
        Self::new(FipsDetector::system(), User::demo())
    }
}
