//! POST /v1/api/auth/refresh-token
//!
//! Exchanges a refresh token for a new access token. The token is read from
//! the JSON body (`refreshToken`) or, when the body has none, from the
//! `refreshToken` cookie. It must verify and must equal the one stored on the
//! user; logout clears the stored value, which revokes every refresh token
//! issued before it.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::COOKIE, HeaderMap},
    Json,
};

use crate::backend::auth::handlers::types::{AccessTokenResponse, RefreshRequest};
use crate::backend::auth::sessions::TokenKind;
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::error::Validate;

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Value of the named cookie across every `Cookie` header
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<AccessTokenResponse>> {
    let mut request = match body {
        Ok(Json(request)) => request,
        // Cookie-only requests carry no JSON body
        Err(JsonRejection::MissingJsonContentType(_)) => RefreshRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    if request.refresh_token.trim().is_empty() {
        if let Some(token) = cookie_value(&headers, REFRESH_TOKEN_COOKIE) {
            request.refresh_token = token.to_string();
        }
    }
    request.validate()?;

    let claims = state.sessions.verify(&request.refresh_token, TokenKind::Refresh)?;
    let user_id = claims.user_id()?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    if user.refresh_token.as_deref() != Some(request.refresh_token.as_str()) {
        tracing::warn!(%user_id, "Refresh token does not match the stored token");
        return Err(ApiError::unauthorized("Refresh token has been revoked"));
    }

    if !user.is_active() {
        return Err(ApiError::forbidden("Account is inactive"));
    }

    let access_token = state.sessions.create_access_token(&user)?;
    Ok(ApiResponse::ok(
        "Access token refreshed",
        AccessTokenResponse { access_token },
    ))
}
