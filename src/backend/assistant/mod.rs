//! AI Assistant Module
//!
//! Billed text generation for signed-in users, mounted at
//! `/v1/api/ai-assistant`.
//!
//! - `POST /chat` - generate a reply, optionally in a bot's persona
//! - `GET /usage` - the caller's usage counters and remaining allowance
//!
//! # Limits
//!
//! Free accounts may use up to `FREE_TOKEN_LIMIT` tokens in total; past that
//! `/chat` answers 429. Pro-only bots answer 403 to free accounts. Pro
//! accounts are not limited.
//!
//! Token counts are an estimate (about four characters per token over prompt
//! and reply); word counts are whitespace-separated words of the reply.

/// Chat handler
pub mod chat;

/// Usage summary
pub mod usage;

pub use chat::{chat, ChatReply, ChatRequest};
pub use usage::{get_usage, UsageSummary};

/// Estimated token cost of one exchange
pub fn estimate_tokens(prompt: &str, reply: &str) -> u64 {
    let chars = prompt.chars().count() + reply.chars().count();
    chars.div_ceil(4) as u64
}

/// Words billed for a reply
pub fn count_words(reply: &str) -> u64 {
    reply.split_whitespace().count() as u64
}
