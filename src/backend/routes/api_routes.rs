/**
 * API Routes
 *
 * The sub-routers mounted under `/v1/api`:
 *
 * - `/auth` - register, login, refresh-token, logout, me
 * - `/user` - profile and account deactivation
 * - `/bots` - bot catalog
 * - `/tools` - tool catalog and word counter
 * - `/ai-assistant` - billed chat and usage
 *
 * Every handler returns `Result<_, ApiError>`, so failures from any
 * sub-router reach the client through the same error envelope.
 */

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::backend::assistant;
use crate::backend::auth::handlers::{get_me, login, logout, refresh_token, register};
use crate::backend::bots;
use crate::backend::server::state::AppState;
use crate::backend::tools;
use crate::backend::user;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/me", get(get_me))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(user::get_profile).patch(user::update_profile))
        .route("/deactivate", patch(user::deactivate))
}

pub fn bot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bots::list_bots))
        .route("/{slug}", get(bots::get_bot))
}

pub fn tool_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tools::list_tools))
        .route("/word-counter", post(tools::word_counter))
}

pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(assistant::chat))
        .route("/usage", get(assistant::get_usage))
}

/// All sub-routers, to be nested at `/v1/api`
pub fn configure_api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/user", user_routes())
        .nest("/bots", bot_routes())
        .nest("/tools", tool_routes())
        .nest("/ai-assistant", assistant_routes())
}
