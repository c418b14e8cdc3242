//! Core types for model routing
//!
//! This module contains TaskType and ModelTier enums for per-step model selection.

use serde::{Deserialize, Serialize};

// ============================================================================
// Task Type
// ============================================================================

/// Task type for model routing
///
/// Each orchestration step maps onto one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Intent classification of a raw request
    Classification,
    /// Gathering and summarizing information
    Research,
    /// Refining a prompt for a downstream generator
    PromptCrafting,
    /// Art direction for image generation
    VisualDirection,
    /// Code generation and modification
    CodeGeneration,
    /// Long-form prose
    Writing,
    /// Merging prior step outputs into one response
    Composition,
}

impl TaskType {
    /// Get the recommended model tier for this task type
    ///
    /// - Fast: classification, prompt crafting
    /// - Standard: research, visual direction, writing, composition
    /// - Premium: code generation
    #[must_use]
    pub fn recommended_tier(&self) -> ModelTier {
        match self {
            Self::Classification | Self::PromptCrafting => ModelTier::Fast,
            Self::Research | Self::VisualDirection | Self::Writing | Self::Composition => {
                ModelTier::Standard
            }
            Self::CodeGeneration => ModelTier::Premium,
        }
    }

    /// Get the default token budget for this task type
    #[must_use]
    pub fn default_token_budget(&self) -> TokenBudget {
        match self {
            Self::Classification => TokenBudget::new(300, 0.0),
            Self::Research => TokenBudget::new(2000, 0.3),
            Self::PromptCrafting => TokenBudget::new(800, 0.7),
            Self::VisualDirection => TokenBudget::new(1000, 0.8),
            Self::CodeGeneration => TokenBudget::new(4096, 0.2),
            Self::Writing => TokenBudget::new(2500, 0.7),
            Self::Composition => TokenBudget::new(3000, 0.5),
        }
    }
}

// ============================================================================
// Token Budget
// ============================================================================

/// Generation limits applied to a task
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenBudget {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Recommended temperature
    pub temperature: f32,
}

impl TokenBudget {
    /// Create a new token budget
    #[must_use]
    pub const fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::new(2048, 0.7)
    }
}

// ============================================================================
// Model Tier
// ============================================================================

/// Model tier for cost/performance trade-off, ordered by cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Cheap, low-latency models
    Fast,
    /// Balanced models for general work
    Standard,
    /// Strongest reasoning models
    Premium,
}

impl ModelTier {
    /// Known default model for a provider at this tier.
    ///
    /// Returns `None` for providers without a tier table, in which case the
    /// provider's own default model is used.
    #[must_use]
    pub fn default_model(&self, provider: &str) -> Option<&'static str> {
        let model = match (self, provider) {
            (ModelTier::Fast, "openrouter") => "openai/gpt-4o-mini",
            (ModelTier::Standard, "openrouter") => "openai/gpt-4o",
            (ModelTier::Premium, "openrouter") => "anthropic/claude-3.5-sonnet",

            (ModelTier::Fast, "openai") => "gpt-4o-mini",
            (ModelTier::Standard | ModelTier::Premium, "openai") => "gpt-4o",

            _ => return None,
        };
        Some(model)
    }

    /// Constrain this tier to not exceed the given maximum tier
    #[must_use]
    pub fn constrain_to(&self, max_tier: &ModelTier) -> ModelTier {
        if self.level() <= max_tier.level() {
            *self
        } else {
            *max_tier
        }
    }

    fn level(&self) -> u8 {
        match self {
            ModelTier::Fast => 0,
            ModelTier::Standard => 1,
            ModelTier::Premium => 2,
        }
    }
}
