//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let environment = std::env::var("FOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{environment}")).required(false))
        .add_source(File::with_name("config/local").required(false))
        // 3. Environment variables (highest priority)
        // prefix_separator("_") makes FOREFRONT_LLM__X work with a single
        // underscore after the prefix.
        .add_source(
            Environment::with_prefix("FOREFRONT")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("orchestrator.consensus_models")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::ClassifierKind;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_sessions, 1000);
        assert_eq!(config.llm.default_provider, "openrouter");
        assert_eq!(config.llm.openrouter.api_key_env, "OPENROUTER_API_KEY");
        assert!(!config.llm.images.enabled);
        assert_eq!(config.orchestrator.quality_threshold, 0.7);
        assert_eq!(config.orchestrator.max_re_research_iterations, 2);
        assert_eq!(config.orchestrator.classifier, ClassifierKind::Heuristic);
        assert!(config.orchestrator.to_core().validate().is_ok());
    }
}
