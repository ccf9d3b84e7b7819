/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The loaded configuration
 * - The user store (PostgreSQL or in-memory)
 * - JWT signing keys
 * - The two text generation providers (vision and text)
 *
 * Every collaborator sits behind an `Arc`, so cloning the state per request
 * is cheap and no request mutates shared state directly.
 *
 * # Example
 *
 * ```rust,no_run
 * use assistant_gateway::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) -> String {
 *     state.config.client_url.clone()
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::persistence::UserStore;
use crate::backend::providers::TextGenerationProvider;
use crate::shared::config::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    /// User persistence
    pub users: Arc<dyn UserStore>,

    /// Access/refresh token keys
    pub sessions: Arc<SessionKeys>,

    /// Provider used for image understanding
    pub vision: Arc<dyn TextGenerationProvider>,

    /// Provider used for plain text generation
    pub text: Arc<dyn TextGenerationProvider>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        vision: Arc<dyn TextGenerationProvider>,
        text: Arc<dyn TextGenerationProvider>,
    ) -> Self {
        let sessions = Arc::new(SessionKeys::from_config(&config));
        Self {
            config: Arc::new(config),
            users,
            sessions,
            vision,
            text,
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Arc<SessionKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}
