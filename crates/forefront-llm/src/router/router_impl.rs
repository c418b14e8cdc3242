//! LLM Router implementation
//!
//! This module contains the main LlmRouter struct that manages multiple providers
//! and routes requests based on task types or explicit model names.

use super::provider::LlmProvider;
use super::rules::RoutingRules;
use super::types::TaskType;
use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::message::Message;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// LLM Router for managing multiple providers with task-based routing
pub struct LlmRouter {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
    default_provider: String,
    routing_rules: RoutingRules,
}

impl LlmRouter {
    /// Create a new router
    #[must_use]
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
            routing_rules: RoutingRules::default(),
        }
    }

    /// Create a router with routing rules
    #[must_use]
    pub fn with_routing_rules(mut self, rules: RoutingRules) -> Self {
        self.routing_rules = rules;
        self
    }

    /// Get the routing rules
    #[must_use]
    pub fn routing_rules(&self) -> &RoutingRules {
        &self.routing_rules
    }

    /// Register a provider
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn LlmProvider>) {
        let name = name.into();
        debug!(provider = %name, "Registering LLM provider");
        self.providers.insert(name, provider);
    }

    /// Get a provider by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(name).cloned()
    }

    /// Get the default provider
    #[must_use]
    pub fn default_provider(&self) -> Option<Arc<dyn LlmProvider>> {
        self.get(&self.default_provider)
    }

    /// Get the default provider name
    #[must_use]
    pub fn default_provider_name(&self) -> &str {
        &self.default_provider
    }

    /// List registered provider names, sorted
    #[must_use]
    pub fn list_providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check if a provider is registered
    #[must_use]
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Find a provider that advertises `model`.
    ///
    /// The default provider is consulted first, then the rest by name.
    #[must_use]
    pub fn provider_for_model(&self, model: &str) -> Option<Arc<dyn LlmProvider>> {
        let advertises = |p: &Arc<dyn LlmProvider>| p.available_models().iter().any(|m| m == model);

        if let Some(default) = self.default_provider().filter(advertises) {
            return Some(default);
        }

        self.list_providers()
            .into_iter()
            .filter_map(|name| self.get(name))
            .find(advertises)
    }

    // ========================================================================
    // Task-based Routing
    // ========================================================================

    /// Select the provider and model for a task type
    #[must_use]
    pub fn select_for_task(&self, task_type: TaskType) -> Option<(Arc<dyn LlmProvider>, String)> {
        let model_override = self.routing_rules.task_models.get(&task_type).cloned();

        // Task-specific provider override
        if let Some(provider_name) = self.routing_rules.task_providers.get(&task_type) {
            if let Some(provider) = self.get(provider_name) {
                let model =
                    model_override.unwrap_or_else(|| provider.default_model().to_string());
                return Some((provider, model));
            }
        }

        let mut tier = task_type.recommended_tier();
        if let Some(max_tier) = &self.routing_rules.max_tier {
            tier = tier.constrain_to(max_tier);
        }

        let provider = self.default_provider()?;
        let provider_name = self.default_provider_name();

        let model = model_override.unwrap_or_else(|| {
            tier.default_model(provider_name)
                .map_or_else(|| provider.default_model().to_string(), str::to_string)
        });

        info!(
            task = ?task_type,
            provider = provider_name,
            model = %model,
            tier = ?tier,
            "Selected model for task"
        );

        Some((provider, model))
    }

    /// Complete a request with model selection and token budget based on task type
    #[instrument(skip(self, messages))]
    pub async fn complete_for_task(
        &self,
        task_type: TaskType,
        messages: Vec<Message>,
    ) -> Result<CompletionResponse> {
        let (provider, model) = self
            .select_for_task(task_type)
            .ok_or_else(|| Error::NotConfigured("No suitable provider found".to_string()))?;

        let budget = self.routing_rules.get_token_budget(task_type);

        debug!(
            task = ?task_type,
            max_tokens = budget.max_tokens,
            temperature = budget.temperature,
            "Applying task-specific token budget"
        );

        let request = CompletionRequest {
            model,
            messages,
            max_tokens: Some(budget.max_tokens),
            temperature: Some(budget.temperature),
            json_mode: provider.supports_json_mode(),
        };

        provider.complete(request).await
    }
}
