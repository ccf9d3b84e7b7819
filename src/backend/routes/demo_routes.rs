/**
 * Liveness and Demo Routes
 *
 * - `GET /v1/api` - liveness check
 * - `GET /image-info` - asks the vision provider to describe an image
 * - `POST /gemini` - asks the text provider a question; the body is the raw
 *   generated text as a JSON string
 *
 * Provider failures are returned as `ApiError`s, so both demo routes always
 * end with a response.
 */

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::backend::error::ApiResult;
use crate::backend::providers::GenerationRequest;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;

pub const LIVENESS_MESSAGE: &str = "Server is Running! 🏃";

pub const DEFAULT_IMAGE_PROMPT: &str = "What's in this image?";
pub const DEFAULT_IMAGE_URL: &str =
    "https://i.ibb.co.com/BNsGYwB/frontend-shejan-mahamud-resume-2-page-0001.jpg";
pub const DEFAULT_TEXT_PROMPT: &str = "What is an embedding model?";

pub async fn liveness() -> ApiResponse<()> {
    ApiResponse::message(LIVENESS_MESSAGE)
}

/// Optional overrides for `/image-info`
#[derive(Debug, Default, Deserialize)]
pub struct ImageInfoQuery {
    pub url: Option<String>,
    pub prompt: Option<String>,
}

pub async fn image_info(
    State(state): State<AppState>,
    Query(query): Query<ImageInfoQuery>,
) -> ApiResult<ApiResponse<()>> {
    let request = GenerationRequest::with_image(
        query.prompt.unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string()),
        query.url.unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
    );

    let description = state.vision.generate(request).await?;
    tracing::debug!(provider = state.vision.name(), chars = description.len(), "Image described");

    Ok(ApiResponse::message(description))
}

/// Optional body for `/gemini`
#[derive(Debug, Default, Deserialize)]
pub struct PromptBody {
    pub prompt: Option<String>,
}

/// The body is optional; a missing or unreadable body uses the default prompt
pub async fn gemini(
    State(state): State<AppState>,
    body: Result<Json<PromptBody>, JsonRejection>,
) -> ApiResult<Json<String>> {
    let prompt = body
        .ok()
        .and_then(|Json(body)| body.prompt)
        .filter(|prompt| !prompt.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEXT_PROMPT.to_string());

    let text = state.text.generate(GenerationRequest::text(prompt)).await?;
    tracing::debug!(provider = state.text.name(), chars = text.len(), "Text generated");

    Ok(Json(text))
}
