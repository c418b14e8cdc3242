//! Router - backend provider abstraction and routing
//!
//! This module defines the core trait for model backends, as well as the
//! router that selects a backend per task.
//!
//! # Module Structure
//!
//! - `types`: Core types (TaskType, ModelTier, TokenBudget)
//! - `rules`: Routing rules configuration
//! - `provider`: LlmProvider trait definition
//! - `mock`: Scripted provider for testing
//! - `router_impl`: LlmRouter implementation

mod mock;
mod provider;
mod router_impl;
mod rules;
mod types;


pub use crate::completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use crate::message::{Message, MessageRole};

pub use mock::MockProvider;
pub use provider::LlmProvider;
pub use router_impl::LlmRouter;
pub use rules::RoutingRules;
pub use types::{ModelTier, TaskType, TokenBudget};
