/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * Two kinds of token are issued: short-lived access tokens sent as
 * `Authorization: Bearer <token>`, and long-lived refresh tokens whose latest
 * value is stored on the user so logout can revoke it.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::shared::config::AppConfig;
use crate::shared::user::{Role, User};

/// Which of the two tokens a claim set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub kind: TokenKind,
    /// Unique per token so two refresh tokens issued in the same second differ
    pub jti: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

impl Claims {
    /// User ID carried in `sub`
    pub fn user_id(&self) -> Result<Uuid, SessionError> {
        Uuid::parse_str(&self.sub).map_err(|_| SessionError::MalformedSubject)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token could not be signed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("expected a {expected:?} token")]
    WrongKind { expected: TokenKind },

    #[error("token subject is not a user id")]
    MalformedSubject,
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Encode(_) => ApiError::unexpected("Internal Server Error!", error),
            other => {
                tracing::warn!(error = %other, "Rejected token");
                ApiError::unauthorized("Invalid or expired token")
            }
        }
    }
}

/// Signing keys and lifetimes for issued tokens
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.access_token_ttl, config.refresh_token_ttl)
    }

    /// Create an access token for a user
    pub fn create_access_token(&self, user: &User) -> Result<String, SessionError> {
        self.create_token(user, TokenKind::Access, self.access_ttl)
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, user: &User) -> Result<String, SessionError> {
        self.create_token(user, TokenKind::Refresh, self.refresh_ttl)
    }

    fn create_token(&self, user: &User, kind: TokenKind, ttl: Duration) -> Result<String, SessionError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            kind,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + ttl.as_secs(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(SessionError::Encode)
    }

    /// Verify and decode a token of the expected kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, SessionError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(SessionError::Invalid)?;

        if data.claims.kind != expected {
            return Err(SessionError::WrongKind { expected });
        }
        Ok(data.claims)
    }
}
