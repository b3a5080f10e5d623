//! PhD journey tracker API server entry point.

use std::sync::Arc;

use journey_api::config::Config;
use journey_api::error::AppError;
use journey_api::{build_router, state};
use journey_core::clock::SystemClock;
use journey_playbook::application::ingest::load_playbook;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting PhD journey API server");

    let config = Config::from_env()?;

    // The playbook is static for the lifetime of the process.
    let path = config.playbook_path.clone();
    let playbook = tokio::task::spawn_blocking(move || load_playbook(&path))
        .await
        .map_err(|e| AppError::Server(std::io::Error::other(e)))??;

    let default_locale = config.resolve_locale(playbook.playbook().locale_default.as_deref());
    let app_state = state::AppState::new(Arc::new(playbook), Arc::new(SystemClock), default_locale);

    let app = build_router(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
