//! Not-found handling.
//!
//! Two stages: the guard is installed as the router fallback and turns any
//! unmatched request into an `ApiError`, so it goes through the normal error
//! boundary. The backstop sits at the edge of the pipeline and replaces any
//! 404 that did not come out of that boundary.

use axum::{
    extract::Request,
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::{ApiError, ErrorEnvelope, NormalizedError};

/// Message for requests no route matched
pub const ROUTE_NOT_FOUND: &str = "Requested URL Not Found";

/// Message written by the backstop
pub const PAGE_NOT_FOUND: &str = "Page Not Found";

/// Router fallback for unmatched paths and unsupported methods
pub async fn not_found_guard(method: Method, uri: Uri) -> ApiError {
    tracing::debug!(%method, %uri, "no route matched");
    ApiError::not_found(ROUTE_NOT_FOUND)
}

/// Replace 404 responses that bypassed the error boundary
pub async fn page_not_found_backstop(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.status() == StatusCode::NOT_FOUND && response.extensions().get::<NormalizedError>().is_none() {
        tracing::warn!("404 response without an error envelope, writing backstop body");
        return (StatusCode::NOT_FOUND, Json(ErrorEnvelope::new(PAGE_NOT_FOUND))).into_response();
    }

    response
}
