//! Envelope assertions

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Assert an error response: status plus `{ success: false, message }`
pub fn assert_error_envelope(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    let body: Value = response.json();
    assert_eq!(body, json!({ "success": false, "message": message }));
}

/// Assert a success response and return its `data`
pub fn assert_success(response: &TestResponse, status: StatusCode) -> Value {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true), "body: {body}");
    assert!(body["message"].is_string(), "body: {body}");
    body["data"].clone()
}
