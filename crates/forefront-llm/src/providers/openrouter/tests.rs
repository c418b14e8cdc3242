use super::provider::OpenRouterProvider;
use super::types::{model_supports_json_mode, OpenRouterConfig, MODELS};
use crate::error::Error;
use crate::router::{LlmProvider, Message};
use reqwest::StatusCode;
use std::time::Duration;

#[test]
fn test_config_builder() {
    let config = OpenRouterConfig::new("test-key")
        .with_model("openai/gpt-4o")
        .with_timeout(Duration::from_secs(60))
        .with_app_name("TestApp");

    assert_eq!(config.api_key, "test-key");
    assert_eq!(config.default_model, "openai/gpt-4o");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.app_name, Some("TestApp".to_string()));
}

#[test]
fn test_debug_masks_key() {
    let config = OpenRouterConfig::new("sk-or-1234567890abcdefghij");
    let debug = format!("{config:?}");
    assert!(debug.contains("sk-o...ghij"));
    assert!(!debug.contains("1234567890"));
}

#[test]
fn test_available_models_include_default() {
    assert!(MODELS.contains(&"openai/gpt-4o"));

    let provider =
        OpenRouterProvider::new(OpenRouterConfig::new("key").with_model("custom/model")).unwrap();
    let models = provider.available_models();
    assert!(models.contains(&"custom/model".to_string()));
    assert!(models.contains(&"anthropic/claude-3.5-sonnet".to_string()));
}

#[test]
fn test_json_mode_support() {
    assert!(model_supports_json_mode("openai/gpt-4o"));
    assert!(!model_supports_json_mode(
        "perplexity/llama-3.1-sonar-large-128k-online"
    ));
}

#[test]
fn test_convert_message() {
    let msg = Message::assistant("Hello!");
    let converted = OpenRouterProvider::convert_message(&msg);
    assert_eq!(converted.role, "assistant");
    assert_eq!(converted.content.as_deref(), Some("Hello!"));
}

#[test]
fn test_map_status() {
    assert!(matches!(
        OpenRouterProvider::map_status(StatusCode::TOO_MANY_REQUESTS, ""),
        Error::RateLimit
    ));

    let err = OpenRouterProvider::map_status(
        StatusCode::BAD_GATEWAY,
        r#"{"error":{"message":"upstream down"}}"#,
    );
    assert!(matches!(err, Error::ServerError { status: 502, ref message } if message == "upstream down"));
    assert!(err.is_transient());

    let err = OpenRouterProvider::map_status(StatusCode::UNAUTHORIZED, "Invalid API key");
    assert!(matches!(err, Error::Api(ref m) if m.starts_with("API authentication error")));
    assert!(!err.is_transient());
}
