//! Bot Catalog
//!
//! The assistant personas offered to users, mounted at `/v1/api/bots`. The
//! catalog is static; each bot carries the persona text the assistant
//! prepends to a prompt, and some bots are reserved for the pro plan.

use axum::extract::Path;
use serde::Serialize;

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::response::ApiResponse;

/// One assistant persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bot {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub persona: &'static str,
    pub pro_only: bool,
}

pub const BOTS: &[Bot] = &[
    Bot {
        slug: "general-assistant",
        name: "General Assistant",
        description: "Answers everyday questions in plain language.",
        persona: "You are a friendly general-purpose assistant. Answer clearly and concisely.",
        pro_only: false,
    },
    Bot {
        slug: "code-helper",
        name: "Code Helper",
        description: "Explains code, finds bugs and suggests fixes.",
        persona: "You are an experienced software engineer. Explain code precisely and show corrected snippets when useful.",
        pro_only: false,
    },
    Bot {
        slug: "email-writer",
        name: "Email Writer",
        description: "Drafts professional emails from a short brief.",
        persona: "You write short, polite, professional emails from the brief you are given.",
        pro_only: false,
    },
    Bot {
        slug: "content-writer",
        name: "Content Writer",
        description: "Long-form articles and blog posts.",
        persona: "You are a content writer. Produce well-structured long-form text with headings.",
        pro_only: true,
    },
];

/// Look up a bot by slug
pub fn find_bot(slug: &str) -> Option<&'static Bot> {
    BOTS.iter().find(|bot| bot.slug == slug)
}

pub async fn list_bots() -> ApiResponse<&'static [Bot]> {
    ApiResponse::ok("Bots retrieved successfully", BOTS)
}

pub async fn get_bot(Path(slug): Path<String>) -> ApiResult<ApiResponse<&'static Bot>> {
    let bot = find_bot(&slug).ok_or_else(|| ApiError::not_found("Bot not found"))?;
    Ok(ApiResponse::ok("Bot retrieved successfully", bot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = BOTS.iter().map(|bot| bot.slug).collect();
        assert_eq!(slugs.len(), BOTS.len());
    }

    #[test]
    fn test_find_bot() {
        assert_eq!(find_bot("code-helper").map(|bot| bot.name), Some("Code Helper"));
        assert!(find_bot("missing").is_none());
    }

    #[test]
    fn test_persona_is_not_serialized() {
        let value = serde_json::to_value(&BOTS[0]).unwrap();
        assert!(value.get("persona").is_none());
        assert_eq!(value["slug"], "general-assistant");
    }
}
