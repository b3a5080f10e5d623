//! Shared application state.

use std::sync::Arc;

use journey_core::clock::Clock;
use journey_playbook::application::ingest::LoadedPlaybook;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The playbook loaded at startup; immutable for the process lifetime.
    pub playbook: Arc<LoadedPlaybook>,
    /// Time source for timer countdowns.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Locale used when a request names none.
    pub default_locale: String,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        playbook: Arc<LoadedPlaybook>,
        clock: Arc<dyn Clock + Send + Sync>,
        default_locale: String,
    ) -> Self {
        Self {
            playbook,
            clock,
            default_locale,
        }
    }
}
