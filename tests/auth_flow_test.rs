//! Authentication, profile and assistant integration tests
//!
//! Everything runs against the in-memory user store.

mod common;

use assistant_gateway::backend::persistence::UserStore;
use assistant_gateway::shared::user::{Subscription, UserPatch};
use axum::http::{header, HeaderValue, StatusCode};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_success() {
    let app = spawn_app();
    let response = app
        .server
        .post("/v1/api/auth/register")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "  Ada@Example.com ",
            "password": "password123"
        }))
        .await;

    let data = assert_success(&response, StatusCode::CREATED);
    assert!(data["accessToken"].is_string());
    assert!(data["refreshToken"].is_string());

    let user = &data["user"];
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "user");
    assert_eq!(user["subscription"], "free");
    assert_eq!(user["status"], "active");
    assert_eq!(user["login_method"], "email");
    assert_eq!(user["tokenUsed"], 0);
    assert_eq!(user["profile_picture"], app.state.config.default_profile_picture.as_str());
    assert!(user.get("password").is_none());
    assert!(user.get("refresh_token").is_none());

    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let app = spawn_app();
    register_user(&app.server, "First", "dup@example.com").await;

    let response = app
        .server
        .post("/v1/api/auth/register")
        .json(&json!({
            "name": "Second",
            "email": "DUP@example.com",
            "password": "password123"
        }))
        .await;

    assert_error_envelope(&response, StatusCode::CONFLICT, "A user with this email already exists");
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_register_missing_field_is_required() {
    let app = spawn_app();
    let response = app
        .server
        .post("/v1/api/auth/register")
        .json(&json!({ "name": "No Email", "password": "password123" }))
        .await;
    assert_error_envelope(&response, StatusCode::BAD_REQUEST, "email: Required");
    assert!(!response.text().contains("deserialize"));
}

#[tokio::test]
async fn test_chat_missing_message_is_required() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "bot": "code-helper" }))
        .await;
    assert_error_envelope(&response, StatusCode::BAD_REQUEST, "message: Required");
}

#[tokio::test]
async fn test_login_success() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/auth/login")
        .json(&json!({ "email": "grace@example.com", "password": user.password }))
        .await;

    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["user"]["id"], user.id.as_str());
    assert_ne!(data["refreshToken"], user.refresh_token.as_str());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = spawn_app();
    register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/auth/login")
        .json(&json!({ "email": "grace@example.com", "password": "wrongpassword" }))
        .await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = spawn_app();
    let response = app
        .server
        .post("/v1/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "Invalid email or password");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = spawn_app();
    let response = app.server.get("/v1/api/auth/me").await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "Authorization token is missing");

    let response = app
        .server
        .get("/v1/api/auth/me")
        .authorization_bearer("not-a-token")
        .await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "Invalid or expired token");
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .get("/v1/api/auth/me")
        .authorization_bearer(&user.access_token)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["email"], "grace@example.com");
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .get("/v1/api/auth/me")
        .authorization_bearer(&user.refresh_token)
        .await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "Invalid or expired token");
}

#[tokio::test]
async fn test_refresh_then_logout_revokes() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/auth/refresh-token")
        .json(&json!({ "refreshToken": user.refresh_token }))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    let access_token = data["accessToken"].as_str().unwrap().to_string();

    let response = app
        .server
        .post("/v1/api/auth/logout")
        .authorization_bearer(&access_token)
        .await;
    assert_success(&response, StatusCode::OK);

    let response = app
        .server
        .post("/v1/api/auth/refresh-token")
        .json(&json!({ "refreshToken": user.refresh_token }))
        .await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "Refresh token has been revoked");
}

#[tokio::test]
async fn test_refresh_token_from_cookie() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let cookie = HeaderValue::from_str(&format!("theme=dark; refreshToken={}", user.refresh_token)).unwrap();
    let response = app
        .server
        .post("/v1/api/auth/refresh-token")
        .add_header(header::COOKIE, cookie)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert!(data["accessToken"].is_string());

    let response = app.server.post("/v1/api/auth/refresh-token").await;
    assert_error_envelope(&response, StatusCode::BAD_REQUEST, "refreshToken: Required");
}

#[tokio::test]
async fn test_update_profile() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .patch("/v1/api/user/profile")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "name": "Grace Hopper", "phone": "+1 555-0100" }))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["name"], "Grace Hopper");
    assert_eq!(data["phone"], "+1 555-0100");

    let response = app
        .server
        .patch("/v1/api/user/profile")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "phone": "call me" }))
        .await;
    assert_error_envelope(&response, StatusCode::BAD_REQUEST, "phone: Invalid phone number");
}

#[tokio::test]
async fn test_deactivated_account_is_locked_out() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .patch("/v1/api/user/deactivate")
        .authorization_bearer(&user.access_token)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["status"], "inactive");

    let response = app
        .server
        .get("/v1/api/user/profile")
        .authorization_bearer(&user.access_token)
        .await;
    assert_error_envelope(&response, StatusCode::FORBIDDEN, "Account is inactive");

    let response = app
        .server
        .post("/v1/api/auth/login")
        .json(&json!({ "email": "grace@example.com", "password": user.password }))
        .await;
    assert_error_envelope(&response, StatusCode::FORBIDDEN, "Account is inactive");

    // The user is kept, only its status changed
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_chat_records_usage() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "message": "Explain lifetimes", "bot": "code-helper" }))
        .await;
    let data = assert_success(&response, StatusCode::OK);

    assert_eq!(data["reply"], TEXT_REPLY);
    assert_eq!(data["bot"], "code-helper");
    assert!(data["tokens"].as_u64().unwrap() > 0);
    assert_eq!(data["words"], TEXT_REPLY.split_whitespace().count());
    assert_eq!(data["usage"]["tokenUsed"], data["tokens"]);

    let prompt = &app.text.requests()[0].prompt;
    assert!(prompt.starts_with("You are an experienced software engineer."));
    assert!(prompt.ends_with("Explain lifetimes"));

    let response = app
        .server
        .get("/v1/api/ai-assistant/usage")
        .authorization_bearer(&user.access_token)
        .await;
    let usage = assert_success(&response, StatusCode::OK);
    assert_eq!(usage["tokenUsed"], data["tokens"]);
    assert_eq!(usage["tokenLimit"], TEST_FREE_TOKEN_LIMIT);
}

#[tokio::test]
async fn test_chat_requires_authentication() {
    let app = spawn_app();
    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .json(&json!({ "message": "hello" }))
        .await;
    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "Authorization token is missing");
    assert_eq!(app.text.call_count(), 0);
}

#[tokio::test]
async fn test_chat_pro_bot_forbidden_for_free_user() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "message": "Write a post", "bot": "content-writer" }))
        .await;
    assert_error_envelope(&response, StatusCode::FORBIDDEN, "This bot requires a pro subscription");
    assert_eq!(app.text.call_count(), 0);
}

#[tokio::test]
async fn test_chat_unknown_bot_is_not_found() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "message": "hello", "bot": "nope" }))
        .await;
    assert_error_envelope(&response, StatusCode::NOT_FOUND, "Bot not found");
}

#[tokio::test]
async fn test_chat_free_limit_is_enforced() {
    let app = spawn_app();
    let user = register_user(&app.server, "Grace", "grace@example.com").await;
    let id = Uuid::parse_str(&user.id).unwrap();
    app.users.record_usage(id, TEST_FREE_TOKEN_LIMIT, 0).await.unwrap();

    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "message": "one more" }))
        .await;
    assert_error_envelope(
        &response,
        StatusCode::TOO_MANY_REQUESTS,
        "Free token limit reached. Upgrade to pro to continue.",
    );

    // Pro accounts are not limited and may use pro bots
    let patch = UserPatch {
        subscription: Some(Subscription::Pro),
        ..UserPatch::default()
    };
    app.users.update(id, patch).await.unwrap();

    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "message": "one more", "bot": "content-writer" }))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["usage"]["tokenLimit"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_chat_provider_failure_does_not_bill() {
    let app = spawn_app_with(
        StubProvider::replying("groq", VISION_REPLY),
        StubProvider::new("gemini", StubBehavior::UpstreamStatus(429)),
    );
    let user = register_user(&app.server, "Grace", "grace@example.com").await;

    let response = app
        .server
        .post("/v1/api/ai-assistant/chat")
        .authorization_bearer(&user.access_token)
        .json(&json!({ "message": "hello" }))
        .await;
    assert_error_envelope(&response, StatusCode::BAD_GATEWAY, "gemini responded with status 429");

    let stored = app
        .users
        .find_by_id(Uuid::parse_str(&user.id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.token_used, 0);
}
