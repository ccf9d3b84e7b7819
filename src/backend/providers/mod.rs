//! AI Provider Module
//!
//! Text generation behind the [`TextGenerationProvider`] trait. Every call
//! returns a `Result`; handlers forward failures into the error boundary so a
//! client always gets a terminal response.
//!
//! # Providers
//!
//! - **`groq`** - [`GroqProvider`], OpenAI-compatible chat completions (used
//!   for image understanding)
//! - **`gemini`** - [`GeminiProvider`], Google Generative Language API

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

/// Groq chat completions
pub mod groq;

/// Gemini generateContent
pub mod gemini;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;

/// One prompt, optionally about an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Publicly reachable image; providers without vision ignore it
    pub image_url: Option<String>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_url: None,
        }
    }

    pub fn with_image(prompt: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_url: Some(image_url.into()),
        }
    }
}

/// Failures from a provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured
    #[error("{provider} is not configured")]
    NotConfigured { provider: &'static str },

    /// The request never produced an HTTP response
    #[error("{provider} request failed")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status
    ///
    /// `body` is kept for the operator log only.
    #[error("{provider} responded with status {status}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider answered without any generated text
    #[error("{provider} returned no content")]
    EmptyResponse { provider: &'static str },
}

impl ProviderError {
    pub(crate) fn transport(provider: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { provider, source }
    }

    /// Status used when this failure reaches the client
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Transport { source, .. } if source.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Transport { .. } | Self::Status { .. } | Self::EmptyResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// A capability that turns a prompt into text
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProviderError::NotConfigured { provider: "groq" }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ProviderError::Status {
                provider: "gemini",
                status: 500,
                body: "boom".to_string()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProviderError::EmptyResponse { provider: "groq" }.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_display_hides_body() {
        let error = ProviderError::Status {
            provider: "groq",
            status: 401,
            body: "{\"error\":\"invalid api key gsk_123\"}".to_string(),
        };
        assert_eq!(error.to_string(), "groq responded with status 401");
    }
}
