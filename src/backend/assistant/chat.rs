use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use super::{count_words, estimate_tokens, usage::UsageSummary};
use crate::backend::bots::find_bot;
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::middleware::{AuthUser, ValidJson};
use crate::backend::providers::GenerationRequest;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::error::{Validate, ValidationError};
use crate::shared::user::Subscription;

/// Longest accepted message, in characters
pub const MAX_MESSAGE_CHARS: usize = 8_000;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatRequest {
    pub message: String,
    /// Bot slug; the plain assistant is used when absent
    pub bot: Option<String>,
}

impl Validate for ChatRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        if self.message.trim().is_empty() {
            error.push(["message"], "Required");
        } else if self.message.chars().count() > MAX_MESSAGE_CHARS {
            error.push(["message"], format!("Must be at most {MAX_MESSAGE_CHARS} characters"));
        }
        if matches!(&self.bot, Some(slug) if slug.trim().is_empty()) {
            error.push(["bot"], "Must not be empty");
        }
        error.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bot: Option<String>,
    /// Billed for this exchange
    pub tokens: u64,
    pub words: u64,
    pub usage: UsageSummary,
}

pub async fn chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(request): ValidJson<ChatRequest>,
) -> ApiResult<ApiResponse<ChatReply>> {
    let bot = match request.bot.as_deref() {
        Some(slug) => Some(find_bot(slug.trim()).ok_or_else(|| ApiError::not_found("Bot not found"))?),
        None => None,
    };

    let free = user.subscription == Subscription::Free;
    if free && bot.is_some_and(|bot| bot.pro_only) {
        return Err(ApiError::forbidden("This bot requires a pro subscription"));
    }
    if free && user.token_used >= state.config.free_token_limit {
        tracing::info!(user_id = %user.id, token_used = user.token_used, "Free token limit reached");
        return Err(ApiError::with_status(
            StatusCode::TOO_MANY_REQUESTS,
            "Free token limit reached. Upgrade to pro to continue.",
        ));
    }

    let prompt = match bot {
        Some(bot) => format!("{}\n\n{}", bot.persona, request.message.trim()),
        None => request.message.trim().to_string(),
    };

    tracing::debug!(provider = state.text.name(), bot = bot.map(|b| b.slug), "Generating reply");
    let reply = state.text.generate(GenerationRequest::text(prompt.as_str())).await?;

    let tokens = estimate_tokens(&prompt, &reply);
    let words = count_words(&reply);
    let user = state.users.record_usage(user.id, tokens, words).await?;
    tracing::info!(user_id = %user.id, tokens, words, "Recorded assistant usage");

    Ok(ApiResponse::ok(
        "Reply generated successfully",
        ChatReply {
            reply,
            bot: bot.map(|bot| bot.slug.to_string()),
            tokens,
            words,
            usage: UsageSummary::for_user(&user, state.config.free_token_limit),
        },
    ))
}
