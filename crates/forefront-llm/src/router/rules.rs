//! Routing rules for model selection

use super::types::{ModelTier, TaskType, TokenBudget};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model routing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingRules {
    /// Task-specific provider overrides
    #[serde(default)]
    pub task_providers: HashMap<TaskType, String>,
    /// Task-specific model overrides
    #[serde(default)]
    pub task_models: HashMap<TaskType, String>,
    /// Task-specific token budget overrides
    #[serde(default)]
    pub task_token_budgets: HashMap<TaskType, TokenBudget>,
    /// Maximum cost tier allowed
    #[serde(default)]
    pub max_tier: Option<ModelTier>,
}

impl RoutingRules {
    /// Get token budget for a task type, with custom override or default
    #[must_use]
    pub fn get_token_budget(&self, task_type: TaskType) -> TokenBudget {
        self.task_token_budgets
            .get(&task_type)
            .copied()
            .unwrap_or_else(|| task_type.default_token_budget())
    }

    /// Route a task to a specific provider
    #[must_use]
    pub fn with_task_provider(mut self, task: TaskType, provider: impl Into<String>) -> Self {
        self.task_providers.insert(task, provider.into());
        self
    }

    /// Pin a task to a specific model
    #[must_use]
    pub fn with_task_model(mut self, task: TaskType, model: impl Into<String>) -> Self {
        self.task_models.insert(task, model.into());
        self
    }

    /// Cap the tier used for any task
    #[must_use]
    pub fn with_max_tier(mut self, tier: ModelTier) -> Self {
        self.max_tier = Some(tier);
        self
    }
}
