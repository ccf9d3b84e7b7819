/**
 * Authentication Extractor
 *
 * Protects routes that require a signed-in user. The access token is read
 * from `Authorization: Bearer <token>`, verified, and the user is loaded from
 * the store so revoked or deactivated accounts are rejected immediately.
 *
 * Rejections are `ApiError`s and therefore use the standard error envelope:
 * - missing, malformed, expired or wrong-kind token → 401
 * - the token's user no longer exists → 401
 * - the account is inactive → 403
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::sessions::TokenKind;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::user::User;

/// Axum extractor for the authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Extract the token from a `Bearer` authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            ApiError::unauthorized("Authorization token is missing")
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Invalid Authorization header format");
            ApiError::unauthorized("Authorization header must use the Bearer scheme")
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = state.sessions.verify(token, TokenKind::Access)?;
        let user_id = claims.user_id()?;

        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%user_id, "Token refers to a missing user");
                ApiError::unauthorized("Invalid or expired token")
            })?;

        if !user.is_active() {
            return Err(ApiError::forbidden("Account is inactive"));
        }

        Ok(AuthUser(user))
    }
}
