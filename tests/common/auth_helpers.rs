//! Authentication test helpers
//!
//! Register users through the HTTP API and hand back their tokens.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

/// Test user credentials
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub const TEST_PASSWORD: &str = "password123";

/// Register a user and return its tokens
pub async fn register_user(server: &TestServer, name: &str, email: &str) -> TestUser {
    let response = server
        .post("/v1/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "body: {}", response.text());

    let body: Value = response.json();
    let data = &body["data"];
    TestUser {
        id: data["user"]["id"].as_str().unwrap().to_string(),
        email: data["user"]["email"].as_str().unwrap().to_string(),
        password: TEST_PASSWORD.to_string(),
        access_token: data["accessToken"].as_str().unwrap().to_string(),
        refresh_token: data["refreshToken"].as_str().unwrap().to_string(),
    }
}
