//! Mock server helpers for integration tests
//!
//! Provides wiremock servers standing in for the Groq and Gemini APIs.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GROQ_TEST_KEY: &str = "groq-test-key";
pub const GEMINI_TEST_KEY: &str = "gemini-test-key";
pub const GEMINI_TEST_MODEL: &str = "gemini-test";

/// Groq chat completions answering with `content`
pub async fn mock_groq(content: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {GROQ_TEST_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;
    server
}

/// Gemini generateContent answering with `parts`
pub async fn mock_gemini(parts: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    let parts: Vec<_> = parts.iter().map(|text| json!({ "text": text })).collect();
    Mock::given(method("POST"))
        .and(path(format!("/models/{GEMINI_TEST_MODEL}:generateContent")))
        .and(header("x-goog-api-key", GEMINI_TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })))
        .mount(&server)
        .await;
    server
}

/// Any POST answered with `status`
pub async fn mock_failure(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status).set_body_string("quota exceeded"))
        .mount(&server)
        .await;
    server
}
