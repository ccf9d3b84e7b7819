/**
 * Server Configuration
 *
 * This module turns an `AppConfig` into the collaborators the server needs:
 * the user store and the two AI providers.
 *
 * # Error Handling
 *
 * A missing or unreachable database is logged and does not prevent startup;
 * the server falls back to the in-memory user store. A provider without an
 * API key is still constructed and fails each call with `NotConfigured`.
 */

use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::persistence::{InMemoryUserStore, PgUserStore, UserStore};
use crate::backend::providers::{GeminiProvider, GroqProvider, TextGenerationProvider};
use crate::shared::config::AppConfig;

/// Failures that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build HTTP client for AI providers")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Serve(#[source] std::io::Error),
}

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize database connection pool
///
/// 1. Creates a PostgreSQL connection pool for `database_url`
/// 2. Runs database migrations
///
/// Returns `None` when no URL is configured or the connection fails.
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Users will be kept in memory.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create database connection pool");
            tracing::warn!("Users will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to run database migrations");
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Pick the user store for this configuration
pub async fn load_user_store(config: &AppConfig) -> Arc<dyn UserStore> {
    match load_database(config.database_url.as_deref()).await {
        Some(pool) => Arc::new(PgUserStore::new(pool)),
        None => Arc::new(InMemoryUserStore::new()),
    }
}

/// Vision and text providers, sharing one HTTP client
pub struct Providers {
    pub vision: Arc<dyn TextGenerationProvider>,
    pub text: Arc<dyn TextGenerationProvider>,
}

pub fn load_providers(config: &AppConfig) -> Result<Providers, StartupError> {
    let client = Client::builder().build().map_err(StartupError::HttpClient)?;

    if config.groq_api_key.is_none() {
        tracing::warn!("GROQ_API_KEY not set. /image-info will answer 503.");
    }
    if config.gemini_api_key.is_none() {
        tracing::warn!("GOOGLE_GENERATIVE_AI_API_KEY not set. Text generation will answer 503.");
    }

    let vision = GroqProvider::new(
        client.clone(),
        config.groq_api_key.clone(),
        config.groq_base_url.clone(),
        config.groq_vision_model.clone(),
        config.provider_timeout,
    );
    let text = GeminiProvider::new(
        client,
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.provider_timeout,
    );

    Ok(Providers {
        vision: Arc::new(vision),
        text: Arc::new(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_database_url_disables_database() {
        assert!(load_database(None).await.is_none());
    }

    #[tokio::test]
    async fn test_providers_are_named() {
        let config = AppConfig::builder().build().unwrap();
        let providers = load_providers(&config).unwrap();
        assert_eq!(providers.vision.name(), "groq");
        assert_eq!(providers.text.name(), "gemini");
    }
}
