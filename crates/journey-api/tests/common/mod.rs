//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use journey_core::clock::Clock;
use journey_playbook::application::ingest::{SourceFormat, ingest_playbook};
use journey_test_support::fixed_clock;
use journey_test_support::fixtures::DOCTORAL_PLAYBOOK_JSON;
use tower::ServiceExt;

use journey_api::build_router;
use journey_api::state::AppState;

/// Build the full app router over the doctoral fixture with a fixed clock.
pub fn build_test_app() -> Router {
    build_test_app_from(DOCTORAL_PLAYBOOK_JSON, "en")
}

/// Build the full app router over an arbitrary JSON playbook.
pub fn build_test_app_from(source: &str, default_locale: &str) -> Router {
    let loaded = ingest_playbook(source, SourceFormat::Json).unwrap();
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(fixed_clock());
    let app_state = AppState::new(Arc::new(loaded), clock, default_locale.to_owned());
    build_router(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
