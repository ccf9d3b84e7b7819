//! Stub AI providers
//!
//! Record every request and answer with a fixed reply or a fixed failure, so
//! route tests never touch the network.

use assistant_gateway::backend::providers::{GenerationRequest, ProviderError, TextGenerationProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// How a stub answers
#[derive(Debug, Clone)]
pub enum StubBehavior {
    Reply(String),
    NotConfigured,
    UpstreamStatus(u16),
    Empty,
}

pub struct StubProvider {
    name: &'static str,
    behavior: StubBehavior,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubProvider {
    pub fn new(name: &'static str, behavior: StubBehavior) -> Self {
        Self {
            name,
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(name: &'static str, reply: &str) -> Self {
        Self::new(name, StubBehavior::Reply(reply.to_string()))
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerationProvider for StubProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request);
        match &self.behavior {
            StubBehavior::Reply(text) => Ok(text.clone()),
            StubBehavior::NotConfigured => Err(ProviderError::NotConfigured { provider: self.name }),
            StubBehavior::UpstreamStatus(status) => Err(ProviderError::Status {
                provider: self.name,
                status: *status,
                body: "upstream said no".to_string(),
            }),
            StubBehavior::Empty => Err(ProviderError::EmptyResponse { provider: self.name }),
        }
    }
}
