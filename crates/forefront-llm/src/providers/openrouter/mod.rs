//! OpenRouter - Multi-provider LLM Gateway
//!
//! One OpenAI-compatible endpoint in front of many model vendors, which lets
//! each workflow step name a different backend model through a single client.

/// OpenRouter provider implementation
pub mod provider;
/// OpenRouter API and configuration types
pub mod types;

#[cfg(test)]
mod tests;

pub use provider::OpenRouterProvider;
pub use types::{OpenRouterConfig, BASE_URL, DEFAULT_MODEL, MODELS};
