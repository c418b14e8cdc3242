//! LLM provider resolution
//!
//! Registers the configured backends and assembles the orchestrator.

use super::config::{AppConfig, ClassifierKind, ImagesSection, LlmConfig};
use anyhow::{Context, Result};
use forefront_core::{LlmIntentClassifier, Orchestrator};
use forefront_llm::{
    ImageGenerator, LlmRouter, OpenAiImageConfig, OpenAiImageGenerator, OpenRouterConfig,
    OpenRouterProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolve and configure LLM providers based on available API keys
pub fn resolve_llm_provider(llm_config: &LlmConfig) -> Result<Arc<LlmRouter>> {
    let mut router = LlmRouter::new(&llm_config.default_provider);
    let section = &llm_config.openrouter;

    match OpenRouterConfig::from_env(&section.api_key_env) {
        Ok(config) => {
            let config = config
                .with_base_url(&section.base_url)
                .with_model(&section.default_model)
                .with_timeout(Duration::from_secs(section.timeout_secs));
            let provider =
                OpenRouterProvider::new(config).context("Failed to create OpenRouter provider")?;
            router.register("openrouter", Arc::new(provider));
            info!(model = %section.default_model, "Registered OpenRouter provider");
        }
        Err(e) => {
            debug!("OpenRouter provider not available: {}", e);
        }
    }

    if router.list_providers().is_empty() {
        warn!(
            "No LLM providers configured. Set {} to enable backend calls.",
            section.api_key_env
        );
    } else if !router.has_provider(&llm_config.default_provider) {
        warn!(
            default_provider = %llm_config.default_provider,
            "Configured default provider is not registered"
        );
    }

    Ok(Arc::new(router))
}

/// Resolve the image renderer, if enabled and keyed
pub fn resolve_image_generator(images: &ImagesSection) -> Result<Option<Arc<dyn ImageGenerator>>> {
    if !images.enabled {
        return Ok(None);
    }

    let Some(api_key) = std::env::var(&images.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
    else {
        warn!(
            "Image rendering enabled but {} is not set; returning visual direction only",
            images.api_key_env
        );
        return Ok(None);
    };

    let config = OpenAiImageConfig::new(api_key)
        .with_base_url(&images.base_url)
        .with_model(&images.model);
    let generator =
        OpenAiImageGenerator::new(config).context("Failed to create image generator")?;
    info!(model = %images.model, "Registered image generator");

    Ok(Some(Arc::new(generator)))
}

/// Build the orchestrator described by the configuration
pub fn build_orchestrator(config: &AppConfig) -> Result<Orchestrator> {
    let core_config = config.orchestrator.to_core();
    core_config
        .validate()
        .context("Invalid [orchestrator] configuration")?;

    let router = resolve_llm_provider(&config.llm)?;
    let mut orchestrator = Orchestrator::from_router(router.clone(), core_config);

    if config.orchestrator.classifier == ClassifierKind::Llm {
        orchestrator = orchestrator.with_classifier(Arc::new(LlmIntentClassifier::new(router)));
    }
    if let Some(generator) = resolve_image_generator(&config.llm.images)? {
        orchestrator = orchestrator.with_image_generator(generator);
    }

    info!(
        classifier = orchestrator.classifier_name(),
        "Orchestrator ready"
    );
    Ok(orchestrator)
}
