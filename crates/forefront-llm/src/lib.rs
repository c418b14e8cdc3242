//! Forefront LLM - Model Backend Abstraction
//!
//! This crate provides the backend side of the orchestration core:
//! - Router: provider trait definition and task-based model selection
//! - OpenRouter: OpenAI-compatible multi-provider gateway
//! - Images: image generation trait and an OpenAI-compatible images client
//! - Mock: scripted providers for tests and offline runs

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod images;
pub mod message;
pub mod providers;
pub mod router;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use error::{Error, Result};
pub use images::{
    ImageGenerator, ImageRequest, ImageResponse, MockImageGenerator, OpenAiImageConfig,
    OpenAiImageGenerator,
};
pub use message::{Message, MessageRole};
pub use providers::openrouter::{OpenRouterConfig, OpenRouterProvider};
pub use router::{
    LlmProvider, LlmRouter, MockProvider, ModelTier, RoutingRules, TaskType, TokenBudget,
};
