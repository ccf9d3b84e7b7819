/**
 * Current User Handlers
 *
 * - GET /v1/api/auth/me - the authenticated user, without sensitive data
 * - POST /v1/api/auth/logout - clears the stored refresh token
 *
 * Both require a valid access token in the `Authorization` header; the
 * `AuthUser` extractor rejects the request before the handler runs otherwise.
 */

use axum::extract::State;

use crate::backend::error::ApiResult;
use crate::backend::middleware::AuthUser;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::user::{UserPatch, UserResponse};

/// Get current user handler
pub async fn get_me(AuthUser(user): AuthUser) -> ApiResult<ApiResponse<UserResponse>> {
    Ok(ApiResponse::ok("User retrieved successfully", UserResponse::from(&user)))
}

/// Logout handler
pub async fn logout(State(state): State<AppState>, AuthUser(user): AuthUser) -> ApiResult<ApiResponse<()>> {
    let patch = UserPatch {
        refresh_token: Some(None),
        ..UserPatch::default()
    };
    state.users.update(user.id, patch).await?;
    tracing::info!(user_id = %user.id, "User logged out");

    Ok(ApiResponse::message("Logged out successfully"))
}
