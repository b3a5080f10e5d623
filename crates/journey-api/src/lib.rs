//! HTTP API library for the PhD journey tracker.
//!
//! Exposes the router, state and configuration so the binary and the
//! integration tests assemble the same application.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the full application router.
pub fn build_router(app_state: state::AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the portal's origin once it is configurable.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/playbook", routes::playbook::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
