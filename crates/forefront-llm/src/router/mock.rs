//! Mock LLM Provider for testing
//!
//! Returns scripted responses in FIFO order and records every request it
//! receives, so tests can assert on what a caller actually sent.

use super::provider::LlmProvider;
use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const MOCK_MODEL: &str = "mock-model";

/// A mock LLM provider that returns queued responses or a fallback one.
pub struct MockProvider {
    name: String,
    models: Vec<String>,
    structured_prompts: bool,
    fallback: String,
    responses: Arc<Mutex<VecDeque<Result<String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            models: vec![MOCK_MODEL.to_string()],
            structured_prompts: true,
            fallback: "mock response".to_string(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Override the provider name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the advertised models (the first one is the default)
    #[must_use]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        if !models.is_empty() {
            self.models = models;
        }
        self
    }

    /// Behave like a backend that only accepts one flat prompt
    #[must_use]
    pub fn with_flat_prompts(mut self) -> Self {
        self.structured_prompts = false;
        self
    }

    /// Content returned once the script queue is empty
    #[must_use]
    pub fn with_fallback_response(mut self, content: impl Into<String>) -> Self {
        self.fallback = content.into();
        self
    }

    /// Add a successful response to the queue.
    pub fn push_response(&self, content: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(content.into()));
    }

    /// Add a failure to the queue.
    pub fn push_error(&self, error: Error) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of `complete` calls received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn available_models(&self) -> Vec<String> {
        self.models.clone()
    }

    fn default_model(&self) -> &str {
        self.models.first().map_or(MOCK_MODEL, String::as_str)
    }

    fn supports_structured_prompts(&self) -> bool {
        self.structured_prompts
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = if request.model.is_empty() {
            self.default_model().to_string()
        } else {
            request.model.clone()
        };

        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        let content = match next {
            Some(scripted) => scripted?,
            None => self.fallback.clone(),
        };

        Ok(CompletionResponse {
            content,
            usage: None,
            finish_reason: Some("stop".to_string()),
            model,
        })
    }
}
