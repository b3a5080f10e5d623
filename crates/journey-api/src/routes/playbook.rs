//! Routes for the playbook and its derived views.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, instrument};

use journey_playbook::application::query_handlers::{
    self, NextEntryView, NodeDetailView, PlaybookSummaryView, WorldSummaryView,
};
use journey_playbook::domain::progress::NodeState;

use crate::error::ApiError;
use crate::state::AppState;

/// Optional `?lang=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    /// Locale for titles; defaults to the server's locale.
    pub lang: Option<String>,
}

/// Request body for POST /journey.
#[derive(Debug, Deserialize)]
pub struct JourneyRequest {
    /// Raw node states reported for the student.
    #[serde(default)]
    pub states: BTreeMap<String, NodeState>,
    /// Locale for titles; defaults to the server's locale.
    pub lang: Option<String>,
}

fn effective_lang(state: &AppState, lang: Option<String>) -> String {
    lang.filter(|l| !l.is_empty())
        .unwrap_or_else(|| state.default_locale.clone())
}

/// GET /
async fn get_summary(State(state): State<AppState>) -> Json<PlaybookSummaryView> {
    Json(query_handlers::get_playbook_summary(
        &state.playbook,
        &state.default_locale,
    ))
}

/// GET /worlds
async fn list_worlds(State(state): State<AppState>) -> Json<Vec<WorldSummaryView>> {
    Json(query_handlers::list_worlds(&state.playbook))
}

/// GET /terminals
async fn get_terminals(State(state): State<AppState>) -> Response {
    Json(query_handlers::get_terminal_node_ids(&state.playbook)).into_response()
}

/// GET /worlds/{world_id}/next-entry
#[instrument(skip(state))]
async fn get_next_entry(
    State(state): State<AppState>,
    Path(world_id): Path<String>,
) -> Result<Json<NextEntryView>, ApiError> {
    let view = query_handlers::get_next_entry(&state.playbook, &world_id)?;
    debug!(next_node_id = ?view.next_node_id, "resolved next world entry");
    Ok(Json(view))
}

/// GET /worlds/{world_id}/edges
#[instrument(skip(state))]
async fn get_world_edges(
    State(state): State<AppState>,
    Path(world_id): Path<String>,
) -> Result<Response, ApiError> {
    let edges = query_handlers::get_world_edges(&state.playbook, &world_id)?;
    Ok(Json(edges).into_response())
}

/// GET /nodes/{node_id}
#[instrument(skip(state, query))]
async fn get_node(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<NodeDetailView>, ApiError> {
    let lang = effective_lang(&state, query.lang);
    let view =
        query_handlers::get_node_detail(&state.playbook, &node_id, &lang, state.clock.as_ref())?;
    Ok(Json(view))
}

/// GET /validation
async fn get_validation(State(state): State<AppState>) -> Response {
    Json(state.playbook.validate()).into_response()
}

/// POST /journey
#[instrument(skip(state, request), fields(reported = request.states.len()))]
async fn build_journey(
    State(state): State<AppState>,
    Json(request): Json<JourneyRequest>,
) -> Response {
    let lang = effective_lang(&state, request.lang);
    Json(query_handlers::build_journey(
        &state.playbook,
        &request.states,
        &lang,
    ))
    .into_response()
}

/// Returns the router for the playbook views.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_summary))
        .route("/worlds", get(list_worlds))
        .route("/worlds/{world_id}/next-entry", get(get_next_entry))
        .route("/worlds/{world_id}/edges", get(get_world_edges))
        .route("/terminals", get(get_terminals))
        .route("/nodes/{node_id}", get(get_node))
        .route("/validation", get(get_validation))
        .route("/journey", post(build_journey))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use journey_core::clock::Clock;
    use journey_playbook::application::ingest::{SourceFormat, ingest_playbook};
    use journey_test_support::fixed_clock;
    use journey_test_support::fixtures::TWO_WORLD_PLAYBOOK_JSON;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app_state() -> AppState {
        let loaded = ingest_playbook(TWO_WORLD_PLAYBOOK_JSON, SourceFormat::Json).unwrap();
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(fixed_clock());
        AppState::new(Arc::new(loaded), clock, "en".to_owned())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_terminals_returns_per_world_ids() {
        // Act
        let (status, json) = get_json("/terminals").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "W1": ["n1", "n2"], "W2": ["n3"] }));
    }

    #[tokio::test]
    async fn test_next_entry_of_first_world() {
        let (status, json) = get_json("/worlds/W1/next-entry").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["next_node_id"], "n3");
    }

    #[tokio::test]
    async fn test_next_entry_of_last_world_is_null() {
        let (status, json) = get_json("/worlds/W2/next-entry").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["next_node_id"].is_null());
    }

    #[tokio::test]
    async fn test_next_entry_of_unknown_world_returns_404() {
        let (status, json) = get_json("/worlds/nonexistent/next-entry").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "world_not_found");
    }

    #[tokio::test]
    async fn test_unknown_node_returns_404() {
        let (status, json) = get_json("/nodes/ghost").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "node_not_found");
    }

    #[tokio::test]
    async fn test_journey_rejects_unknown_state_with_422() {
        // Arrange
        let app = router().with_state(test_app_state());
        let body = serde_json::json!({ "states": { "n1": "finished" } });
        let request = Request::builder()
            .method("POST")
            .uri("/journey")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
