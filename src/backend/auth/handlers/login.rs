/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /v1/api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Issue an access token and a refresh token
 * 4. Store the refresh token on the user
 *
 * # Security
 *
 * - Unknown email and wrong password return the same 401 message
 * - Accounts created through OAuth have no password and cannot log in here
 * - Inactive accounts are refused with 403
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::password::verify_password;
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::middleware::ValidJson;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::user::{normalize_email, User, UserPatch, UserResponse};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Issue both tokens and remember the refresh token on the user
pub(crate) async fn start_session(state: &AppState, user: User) -> ApiResult<AuthResponse> {
    let access_token = state.sessions.create_access_token(&user)?;
    let refresh_token = state.sessions.create_refresh_token(&user)?;

    let patch = UserPatch {
        refresh_token: Some(Some(refresh_token.clone())),
        ..UserPatch::default()
    };
    let user = state.users.update(user.id, patch).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: UserResponse::from(&user),
    })
}

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing email or password
/// * `401 Unauthorized` - Unknown email, wrong password, or an OAuth-only account
/// * `403 Forbidden` - The account is inactive
pub async fn login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthResponse>> {
    let email = normalize_email(&request.email);
    tracing::info!(%email, "Login request");

    let user = state.users.find_by_email(&email).await?.ok_or_else(|| {
        tracing::warn!(%email, "Login for unknown email");
        ApiError::unauthorized(INVALID_CREDENTIALS)
    })?;

    let Some(hash) = user.password.clone() else {
        tracing::warn!(%email, method = %user.login_method, "Password login for OAuth account");
        return Err(ApiError::unauthorized(format!(
            "This account signs in with {}",
            user.login_method
        )));
    };

    if !verify_password(request.password, hash).await? {
        tracing::warn!(%email, "Invalid password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if !user.is_active() {
        return Err(ApiError::forbidden("Account is inactive"));
    }

    let session = start_session(&state, user).await?;
    tracing::info!(user_id = %session.user.id, "User logged in");

    Ok(ApiResponse::ok("Login successful", session))
}
