//! Groq chat completions.
//!
//! Groq exposes an OpenAI-compatible API. The request mirrors the vision
//! demo call: a single user message made of a text part and, when present,
//! an `image_url` part.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{GenerationRequest, ProviderError, TextGenerationProvider};

const PROVIDER: &str = "groq";

/// OpenAI-compatible chat completion client for Groq
pub struct GroqProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
    stop: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqProvider {
    /// `base_url` is the API root, e.g. `https://api.groq.com/openai/v1`
    pub fn new(
        client: Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        }
    }

    fn build_body(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        let mut content = vec![json!({ "type": "text", "text": request.prompt })];
        if let Some(url) = &request.image_url {
            content.push(json!({ "type": "image_url", "image_url": { "url": url } }));
        }

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![json!({ "role": "user", "content": content })],
            temperature: 1.0,
            max_tokens: 1024,
            top_p: 1.0,
            stream: false,
            stop: None,
        }
    }
}

#[async_trait]
impl TextGenerationProvider for GroqProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured { provider: PROVIDER })?;

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, has_image = request.image_url.is_some(), "calling groq");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&self.build_body(&request))
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse { provider: PROVIDER })
    }
}
