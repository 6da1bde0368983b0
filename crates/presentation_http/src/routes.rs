//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
///
/// Every response carries an `X-Request-Id` header.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Weather lookup, with and without the trailing slash
        .route("/weather", get(handlers::weather::get_weather))
        .route("/weather/", get(handlers::weather::get_weather))
        // Attach state
        .with_state(state)
        .layer(RequestIdLayer::new())
}
