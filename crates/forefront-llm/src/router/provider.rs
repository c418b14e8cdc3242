//! LLM Provider trait definition
//!
//! This module defines the core trait that all model backends must implement.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Result;

/// Trait for LLM providers
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get available models
    fn available_models(&self) -> Vec<String>;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Whether the backend honours multi-part (system + user + assistant) prompts.
    ///
    /// Backends that only accept one flat prompt return `false`, and callers
    /// collapse their request into a single user message.
    fn supports_structured_prompts(&self) -> bool {
        true
    }

    /// Whether the backend can be asked for a JSON object response
    fn supports_json_mode(&self) -> bool {
        false
    }

    /// Complete a conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
