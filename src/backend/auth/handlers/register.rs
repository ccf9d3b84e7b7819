/**
 * Register Handler
 *
 * POST /v1/api/auth/register
 *
 * # Registration Process
 *
 * 1. Validate name, email and password (`ValidJson`)
 * 2. Hash password using bcrypt
 * 3. Create the user; the store enforces email uniqueness
 * 4. Issue tokens and return them with the user
 *
 * A taken email surfaces from the store as a conflict and is answered with
 * 409. There is no separate pre-check, so two concurrent registrations for
 * the same address cannot both succeed.
 */

use axum::extract::State;

use crate::backend::auth::handlers::login::start_session;
use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::password::hash_password;
use crate::backend::error::ApiResult;
use crate::backend::middleware::ValidJson;
use crate::backend::response::{ApiResponse, Created};
use crate::backend::server::state::AppState;
use crate::shared::error::Validate;
use crate::shared::user::NewUser;

pub async fn register(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> ApiResult<Created<AuthResponse>> {
    tracing::info!(email = %request.email, "Register request");

    let picture = request
        .profile_picture
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| state.config.default_profile_picture.clone());

    let mut new_user = NewUser::new(request.name, &request.email, picture);
    new_user.phone = request.phone.filter(|p| !p.trim().is_empty());
    new_user.password = Some(hash_password(request.password, state.config.bcrypt_cost).await?);
    new_user.validate()?;

    let user = state.users.create(new_user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    let session = start_session(&state, user).await?;
    Ok(Created(ApiResponse::ok("User registered successfully", session)))
}
