//! Orchestrator configuration
//!
//! Contains configuration types for the orchestrator:
//! - `OrchestratorConfig` for pipeline settings
//! - `ExecuteRequest` for one call's input

use crate::error::{Error, Result};
use crate::utils::RetryConfig;
use forefront_llm::{Message, MessageRole};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard ceiling on re-research passes, whatever the configuration says
pub const MAX_RE_RESEARCH_CAP: u32 = 3;

/// One caller-supplied conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// `user`, `assistant` or `system`
    pub role: String,
    /// Turn text
    pub content: String,
}

impl ConversationTurn {
    /// Create a turn
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub(crate) fn to_message(&self) -> Message {
        Message::new(MessageRole::from_label(&self.role), self.content.clone())
    }
}

/// Read-only context the caller passes on every call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Prior turns, oldest first
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    /// Caller's user id
    #[serde(default)]
    pub user_id: String,
}

/// Input for one `execute()` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// The user's request
    pub message: String,
    /// Preferred model for generation steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Conversation context
    #[serde(default)]
    pub context: RequestContext,
    /// Caller's user id
    #[serde(default)]
    pub user_id: String,
}

impl ExecuteRequest {
    /// Create a request without history
    #[must_use]
    pub fn new(message: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            message: message.into(),
            model: None,
            context: RequestContext {
                conversation_history: Vec::new(),
                user_id: user_id.clone(),
            },
            user_id,
        }
    }

    /// Set the preferred generation model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the conversation history
    #[must_use]
    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.context.conversation_history = history;
        self
    }
}

/// Configuration for the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Composed answers scoring below this trigger re-research
    pub quality_threshold: f64,
    /// Re-research passes allowed per call, clamped to [`MAX_RE_RESEARCH_CAP`]
    pub max_re_research_iterations: u32,
    /// Upper bound for one backend call
    pub step_timeout: Duration,
    /// Models an aggregated step fans out to; empty means a single call
    pub consensus_models: Vec<String>,
    /// Conversation turns forwarded to each step
    pub history_limit: usize,
    /// Backend retry policy for the default dispatcher
    pub retry: RetryConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            quality_threshold: 0.7,
            max_re_research_iterations: 2,
            step_timeout: Duration::from_secs(60),
            consensus_models: Vec::new(),
            history_limit: 10,
            retry: RetryConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quality threshold
    #[must_use]
    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    /// Set the re-research budget
    #[must_use]
    pub fn with_max_re_research_iterations(mut self, iterations: u32) -> Self {
        self.max_re_research_iterations = iterations;
        self
    }

    /// Set the per-call timeout
    #[must_use]
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Set the consensus models
    #[must_use]
    pub fn with_consensus_models(mut self, models: Vec<String>) -> Self {
        self.consensus_models = models;
        self
    }

    /// Set how many history turns each step sees
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the backend retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Re-research passes actually allowed
    #[must_use]
    pub fn re_research_limit(&self) -> u32 {
        self.max_re_research_iterations.min(MAX_RE_RESEARCH_CAP)
    }

    /// Check the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.quality_threshold) {
            return Err(Error::InvalidConfig {
                field: "quality_threshold".to_string(),
                message: format!("must be within [0, 1], got {}", self.quality_threshold),
            });
        }
        if self.step_timeout.is_zero() {
            return Err(Error::InvalidConfig {
                field: "step_timeout".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.consensus_models.iter().any(|m| m.trim().is_empty()) {
            return Err(Error::InvalidConfig {
                field: "consensus_models".to_string(),
                message: "model names must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
