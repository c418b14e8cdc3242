//! Server configuration types
//!
//! Contains all configuration structures for the Forefront server.

use forefront_core::{OrchestratorConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorAppConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Chat sessions kept in memory; the least recently used is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_sessions: default_max_sessions(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines on stdout
    #[serde(default)]
    pub json: bool,
    /// Also write daily-rolling JSON log files here
    #[serde(default)]
    pub directory: Option<String>,
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub default_provider: String,
    #[serde(default)]
    pub openrouter: OpenRouterSection,
    #[serde(default)]
    pub images: ImagesSection,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_provider: "openrouter".to_string(),
            openrouter: OpenRouterSection::default(),
            images: ImagesSection::default(),
        }
    }
}

/// OpenRouter gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterSection {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub default_model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenRouterSection {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            default_model: "openai/gpt-4o-mini".to_string(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_llm_timeout() -> u64 {
    120
}

/// Image rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesSection {
    #[serde(default)]
    pub enabled: bool,
    pub base_url: String,
    pub api_key_env: String,
    pub model: String,
}

impl Default for ImagesSection {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "dall-e-3".to_string(),
        }
    }
}

/// Which intent classifier the orchestrator uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    #[default]
    Heuristic,
    Llm,
}

/// Orchestrator configuration (exposed to TOML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorAppConfig {
    #[serde(default = "default_quality_threshold")]
    pub quality_threshold: f64,
    #[serde(default = "default_max_re_research")]
    pub max_re_research_iterations: u32,
    #[serde(default = "default_step_timeout_secs")]
    pub step_timeout_secs: u64,
    #[serde(default)]
    pub consensus_models: Vec<String>,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub classifier: ClassifierKind,
}

impl Default for OrchestratorAppConfig {
    fn default() -> Self {
        Self {
            quality_threshold: default_quality_threshold(),
            max_re_research_iterations: default_max_re_research(),
            step_timeout_secs: default_step_timeout_secs(),
            consensus_models: Vec::new(),
            history_limit: default_history_limit(),
            classifier: ClassifierKind::Heuristic,
        }
    }
}

impl OrchestratorAppConfig {
    /// Library configuration for these settings
    pub fn to_core(&self) -> OrchestratorConfig {
        OrchestratorConfig::new()
            .with_quality_threshold(self.quality_threshold)
            .with_max_re_research_iterations(self.max_re_research_iterations)
            .with_step_timeout(Duration::from_secs(self.step_timeout_secs))
            .with_consensus_models(self.consensus_models.clone())
            .with_history_limit(self.history_limit)
            .with_retry(RetryConfig::default())
    }
}

fn default_quality_threshold() -> f64 {
    0.7
}
fn default_max_re_research() -> u32 {
    2
}
fn default_step_timeout_secs() -> u64 {
    60
}
fn default_history_limit() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_section_maps_to_core() {
        let section = OrchestratorAppConfig {
            quality_threshold: 0.8,
            step_timeout_secs: 5,
            consensus_models: vec!["a".to_string(), "b".to_string()],
            ..OrchestratorAppConfig::default()
        };

        let core = section.to_core();
        assert_eq!(core.quality_threshold, 0.8);
        assert_eq!(core.step_timeout, Duration::from_secs(5));
        assert_eq!(core.consensus_models.len(), 2);
        assert_eq!(core.history_limit, 10);
    }

    #[test]
    fn test_classifier_kind_labels() {
        let kind: ClassifierKind = serde_json::from_str("\"llm\"").unwrap();
        assert_eq!(kind, ClassifierKind::Llm);
        assert_eq!(ClassifierKind::default(), ClassifierKind::Heuristic);
    }
}
