use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::backend::error::ApiResult;
use crate::backend::middleware::AuthUser;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::user::{Subscription, User};

/// Usage counters and the remaining free allowance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub subscription: Subscription,
    pub token_used: u64,
    pub word_used: u64,
    /// `None` for unlimited plans
    pub token_limit: Option<u64>,
    pub tokens_remaining: Option<u64>,
    pub limit_exceeded: bool,
}

impl UsageSummary {
    pub fn for_user(user: &User, free_token_limit: u64) -> Self {
        let token_limit = match user.subscription {
            Subscription::Free => Some(free_token_limit),
            Subscription::Pro => None,
        };
        Self {
            subscription: user.subscription,
            token_used: user.token_used,
            word_used: user.word_used,
            token_limit,
            tokens_remaining: token_limit.map(|limit| limit.saturating_sub(user.token_used)),
            limit_exceeded: token_limit.is_some_and(|limit| user.token_used >= limit),
        }
    }
}

pub async fn get_usage(State(state): State<AppState>, AuthUser(user): AuthUser) -> ApiResult<ApiResponse<UsageSummary>> {
    Ok(ApiResponse::ok(
        "Usage retrieved successfully",
        UsageSummary::for_user(&user, state.config.free_token_limit),
    ))
}
