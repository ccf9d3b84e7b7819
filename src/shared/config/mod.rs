//! Application configuration module
//!
//! Provides [`AppConfig`], loaded from environment variables (after `dotenv`
//! has read an optional `.env` file) or assembled with [`AppConfigBuilder`].
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SERVER_PORT` | `3000` |
//! | `CLIENT_URL` | `http://localhost:5173` |
//! | `DATABASE_URL` | unset (in-memory user store) |
//! | `JWT_SECRET` | development secret |
//! | `ACCESS_TOKEN_TTL_MINUTES` | `60` |
//! | `REFRESH_TOKEN_TTL_DAYS` | `30` |
//! | `BCRYPT_COST` | `bcrypt::DEFAULT_COST` |
//! | `GROQ_API_KEY` | unset |
//! | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1` |
//! | `GROQ_VISION_MODEL` | `llama-3.2-11b-vision-preview` |
//! | `GOOGLE_GENERATIVE_AI_API_KEY` | unset |
//! | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com/v1beta` |
//! | `GEMINI_MODEL` | `gemini-1.5-pro-latest` |
//! | `PROVIDER_TIMEOUT_SECS` | `60` |
//! | `FREE_TOKEN_LIMIT` | `10000` |
//! | `DEFAULT_PROFILE_PICTURE` | placeholder avatar URL |

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_VISION_MODEL: &str = "llama-3.2-11b-vision-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_PROFILE_PICTURE: &str = "https://i.ibb.co/default-avatar.png";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the server binds on `0.0.0.0`
    pub port: u16,
    /// The single browser origin allowed by CORS
    pub client_url: String,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HMAC secret for access and refresh tokens
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_vision_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// Upper bound for a single provider call
    pub provider_timeout: Duration,
    /// Tokens a free-plan user may consume through the assistant
    pub free_token_limit: u64,
    /// Used when a new account does not supply a picture
    pub default_profile_picture: String,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(port) = parse_var(&get, "SERVER_PORT")? {
            builder = builder.port(port);
        }
        if let Some(url) = get("CLIENT_URL") {
            builder = builder.client_url(url);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        match get("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => tracing::warn!("JWT_SECRET not set, using the development secret"),
        }
        if let Some(minutes) = parse_var::<u64, _>(&get, "ACCESS_TOKEN_TTL_MINUTES")? {
            builder = builder.access_token_ttl(Duration::from_secs(minutes * 60));
        }
        if let Some(days) = parse_var::<u64, _>(&get, "REFRESH_TOKEN_TTL_DAYS")? {
            builder = builder.refresh_token_ttl(Duration::from_secs(days * 24 * 60 * 60));
        }
        if let Some(cost) = parse_var(&get, "BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(key) = get("GROQ_API_KEY") {
            builder = builder.groq_api_key(key);
        }
        if let Some(url) = get("GROQ_BASE_URL") {
            builder = builder.groq_base_url(url);
        }
        if let Some(model) = get("GROQ_VISION_MODEL") {
            builder = builder.groq_vision_model(model);
        }
        if let Some(key) = get("GOOGLE_GENERATIVE_AI_API_KEY") {
            builder = builder.gemini_api_key(key);
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            builder = builder.gemini_base_url(url);
        }
        if let Some(model) = get("GEMINI_MODEL") {
            builder = builder.gemini_model(model);
        }
        if let Some(secs) = parse_var(&get, "PROVIDER_TIMEOUT_SECS")? {
            builder = builder.provider_timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = parse_var(&get, "FREE_TOKEN_LIMIT")? {
            builder = builder.free_token_limit(limit);
        }
        if let Some(url) = get("DEFAULT_PROFILE_PICTURE") {
            builder = builder.default_profile_picture(url);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("CLIENT_URL", &self.client_url)?;
        validate_http_url("GROQ_BASE_URL", &self.groq_base_url)?;
        validate_http_url("GEMINI_BASE_URL", &self.gemini_base_url)?;
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T, F>(get: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
            })
        })
        .transpose()
}

fn validate_http_url(key: &'static str, url: &str) -> Result<(), ConfigError> {
    let has_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_scheme || url.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidUrl(format!("{key}={url}")));
    }
    Ok(())
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    client_url: Option<String>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    access_token_ttl: Option<Duration>,
    refresh_token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    groq_api_key: Option<String>,
    groq_base_url: Option<String>,
    groq_vision_model: Option<String>,
    gemini_api_key: Option<String>,
    gemini_base_url: Option<String>,
    gemini_model: Option<String>,
    provider_timeout: Option<Duration>,
    free_token_limit: Option<u64>,
    default_profile_picture: Option<String>,
}

impl AppConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the allowed client origin
    pub fn client_url(mut self, url: impl Into<String>) -> Self {
        self.client_url = Some(url.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = Some(ttl);
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = Some(ttl);
        self
    }

    /// Set the bcrypt cost (tests use the minimum of 4)
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn groq_api_key(mut self, key: impl Into<String>) -> Self {
        self.groq_api_key = Some(key.into());
        self
    }

    pub fn groq_base_url(mut self, url: impl Into<String>) -> Self {
        self.groq_base_url = Some(url.into());
        self
    }

    pub fn groq_vision_model(mut self, model: impl Into<String>) -> Self {
        self.groq_vision_model = Some(model.into());
        self
    }

    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    pub fn gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = Some(url.into());
        self
    }

    pub fn gemini_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = Some(model.into());
        self
    }

    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = Some(timeout);
        self
    }

    pub fn free_token_limit(mut self, limit: u64) -> Self {
        self.free_token_limit = Some(limit);
        self
    }

    pub fn default_profile_picture(mut self, url: impl Into<String>) -> Self {
        self.default_profile_picture = Some(url.into());
        self
    }

    /// Build the configuration, filling defaults and validating the result
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            client_url: self
                .client_url
                .unwrap_or_else(|| DEFAULT_CLIENT_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            database_url: self.database_url,
            jwt_secret: self
                .jwt_secret
                .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            access_token_ttl: self
                .access_token_ttl
                .unwrap_or(Duration::from_secs(60 * 60)),
            refresh_token_ttl: self
                .refresh_token_ttl
                .unwrap_or(Duration::from_secs(30 * 24 * 60 * 60)),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
            groq_api_key: self.groq_api_key,
            groq_base_url: self
                .groq_base_url
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            groq_vision_model: self
                .groq_vision_model
                .unwrap_or_else(|| DEFAULT_GROQ_VISION_MODEL.to_string()),
            gemini_api_key: self.gemini_api_key,
            gemini_base_url: self
                .gemini_base_url
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: self
                .gemini_model
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            provider_timeout: self.provider_timeout.unwrap_or(Duration::from_secs(60)),
            free_token_limit: self.free_token_limit.unwrap_or(10_000),
            default_profile_picture: self
                .default_profile_picture
                .unwrap_or_else(|| DEFAULT_PROFILE_PICTURE.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.client_url, DEFAULT_CLIENT_URL);
        assert!(config.database_url.is_none());
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.free_token_limit, 10_000);
    }

    #[test]
    fn test_env_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SERVER_PORT", "8080"),
            ("CLIENT_URL", "https://app.example.com/"),
            ("DATABASE_URL", "postgres://localhost/gateway"),
            ("ACCESS_TOKEN_TTL_MINUTES", "15"),
            ("BCRYPT_COST", "4"),
            ("GROQ_API_KEY", "gsk_test"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.client_url, "https://app.example.com");
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/gateway"));
        assert_eq!(config.access_token_ttl, Duration::from_secs(15 * 60));
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.groq_api_key.as_deref(), Some("gsk_test"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("GROQ_API_KEY", "  ")])).unwrap();
        assert!(config.groq_api_key.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_client_url() {
        let err = AppConfig::builder().client_url("localhost:5173").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        let err = AppConfig::builder().bcrypt_cost(2).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "BCRYPT_COST", .. }));
    }
}
