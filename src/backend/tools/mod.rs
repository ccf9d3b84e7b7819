//! Writing Tools
//!
//! Small text utilities mounted at `/v1/api/tools`. They run locally and do
//! not call an AI provider or touch usage counters.

use serde::{Deserialize, Serialize};

use crate::backend::error::ApiResult;
use crate::backend::middleware::ValidJson;
use crate::backend::response::ApiResponse;
use crate::shared::error::{Validate, ValidationError};

/// Catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Endpoint under `/v1/api/tools`
    pub path: &'static str,
}

pub const TOOLS: &[Tool] = &[Tool {
    slug: "word-counter",
    name: "Word Counter",
    description: "Counts words, characters, sentences and paragraphs.",
    path: "/word-counter",
}];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WordCountRequest {
    pub text: String,
}

impl Validate for WordCountRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::new().field(["text"], "Required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCount {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub sentences: usize,
    pub paragraphs: usize,
}

impl WordCount {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
            characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
            sentences: count_sentences(text),
            paragraphs: text
                .split("\n\n")
                .filter(|p| !p.trim().is_empty())
                .count(),
        }
    }
}

/// Sentences end at `.`, `!` or `?` followed by whitespace or the end of
/// the text, so decimals such as `3.5` do not split a sentence.
/// Abbreviations (`Dr. Smith`) still count as a break.
fn count_sentences(text: &str) -> usize {
    let mut sentences = 0;
    let mut open = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let ends = matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|next| next.is_whitespace());
        if ends {
            if open {
                sentences += 1;
            }
            open = false;
        } else if !c.is_whitespace() && !matches!(c, '.' | '!' | '?') {
            open = true;
        }
    }
    if open {
        sentences += 1;
    }
    sentences
}

pub async fn list_tools() -> ApiResponse<&'static [Tool]> {
    ApiResponse::ok("Tools retrieved successfully", TOOLS)
}

pub async fn word_counter(ValidJson(request): ValidJson<WordCountRequest>) -> ApiResult<ApiResponse<WordCount>> {
    Ok(ApiResponse::ok("Text analyzed successfully", WordCount::of(&request.text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_word_count() {
        let count = WordCount::of("Hello world. How are you?\n\nFine!");
        assert_eq!(
            count,
            WordCount {
                words: 6,
                characters: 32,
                characters_no_spaces: 26,
                sentences: 3,
                paragraphs: 2,
            }
        );
    }

    #[test]
    fn test_text_without_terminator_is_one_sentence() {
        assert_eq!(WordCount::of("no full stop here").sentences, 1);
    }

    #[test]
    fn test_decimals_do_not_split_sentences() {
        assert_eq!(WordCount::of("The parcel weighs 3.5 kg. It costs $4.20!").sentences, 2);
        assert_eq!(WordCount::of("Wait... what?!").sentences, 2);
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let request = WordCountRequest { text: " \n ".to_string() };
        assert_eq!(request.validate().unwrap_err().render(), "text: Required");
    }
}
