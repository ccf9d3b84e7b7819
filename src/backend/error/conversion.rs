/**
 * Error Conversion
 *
 * The error boundary: every failure that reaches the client passes through
 * `normalize`, which is a pure function of the error value.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "email: Required; age: Must be positive"
 * }
 * ```
 *
 * # Rules
 *
 * 1. The message is the error's message, or `"Internal Server Error!"` when
 *    that is empty.
 * 2. Validation failures are rendered as `"<path>: <message>"` joined by `"; "`.
 * 3. The status is the variant's status rule (see `types`).
 */

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::backend::error::types::ApiError;

/// Used when an error carries no message of its own
pub const DEFAULT_ERROR_MESSAGE: &str = "Internal Server Error!";

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,
    /// Single human-readable line
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Response extension marking a body produced by the error boundary
#[derive(Debug, Clone, Copy)]
pub struct NormalizedError;

/// Map an error to its status and client envelope
pub fn normalize(error: &ApiError) -> (StatusCode, ErrorEnvelope) {
    let message = error.message();
    let message = if message.trim().is_empty() {
        DEFAULT_ERROR_MESSAGE.to_string()
    } else {
        message
    };
    (error.status_code(), ErrorEnvelope::new(message))
}

/// Emit the operator-facing log lines for an error
pub(crate) fn log_error(error: &ApiError, status: StatusCode, envelope: &ErrorEnvelope) {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), message = %envelope.message, "request failed");
    } else {
        tracing::warn!(status = status.as_u16(), message = %envelope.message, "request rejected");
    }
    tracing::debug!(chain = %error.diagnostic(), "error chain");
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = normalize(&self);
        log_error(&self, status, &envelope);

        let mut response = (status, Json(envelope)).into_response();
        response.extensions_mut().insert(NormalizedError);
        response
    }
}

/// Convert body extraction failures into the same pipeline
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Http {
            status: Some(rejection.status().as_u16()),
            message: rejection.body_text(),
        }
    }
}

/// Response for a handler that panicked
///
/// Installed through `CatchPanicLayer::custom`; the panic payload is logged
/// and never sent to the client.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");

    ApiError::internal(DEFAULT_ERROR_MESSAGE).into_response()
}
