/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, store and provider loading, and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Load the user store (PostgreSQL when reachable, otherwise in memory)
 * 2. Build the AI providers
 * 3. Create the application state
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_providers, load_user_store, StartupError};
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Only a failure to build the provider HTTP client is fatal. A missing
/// database is logged and replaced by the in-memory store.
pub async fn create_app(config: AppConfig) -> Result<Router, StartupError> {
    tracing::info!("Initializing assistant gateway");

    let users = load_user_store(&config).await;
    let providers = load_providers(&config)?;

    let app_state = AppState::new(config, users, providers.vision, providers.text);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
