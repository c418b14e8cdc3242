//! End-to-end runs through the heuristic classifier, the router dispatcher
//! and a scripted backend.

use forefront_core::{
    ExecuteRequest, ExecutionStatus, Orchestrator, OrchestratorConfig, RetryConfig, StepStatus,
    StepType,
};
use forefront_llm::{Error as LlmError, LlmRouter, MessageRole, MockImageGenerator, MockProvider};
use std::sync::Arc;
use std::time::Duration;

const CLIMATE: &str = "Research climate change data and create an infographic presentation";
const CYBERPUNK: &str = "Generate an image of a cyberpunk city at night with neon lights";

const RESEARCH: &str = r#"{"summary":"Global temperatures rose 1.1C since 1900.","keyFindings":["CO2 at 420ppm"],"citations":[{"title":"IPCC AR6"}],"confidence":0.85}"#;
const PROMPT: &str = r#"{"optimizedPrompt":"Clean infographic of warming trends, blue to red palette"}"#;
const TEXT: &str = r#"{"title":"Climate in numbers","content":"Temperatures are rising."}"#;
const VISUAL: &str = r#"{"imagePrompt":"Infographic of warming trends","style":"flat","aspectRatio":"16:9"}"#;
const COMPOSED: &str = r#"{"response":"Here is your climate infographic presentation.","qualityScore":0.92}"#;

fn router_with(provider: Arc<MockProvider>) -> Arc<LlmRouter> {
    let mut router = LlmRouter::new("mock");
    router.register("mock", provider);
    Arc::new(router)
}

fn config() -> OrchestratorConfig {
    OrchestratorConfig::new().with_retry(
        RetryConfig::default()
            .with_initial_delay(Duration::from_millis(1))
            .with_jitter(false),
    )
}

fn script_climate(provider: &MockProvider) {
    for answer in [RESEARCH, PROMPT, TEXT, VISUAL, COMPOSED] {
        provider.push_response(answer);
    }
}

#[tokio::test]
async fn test_research_and_visualization_pipeline() {
    let provider = Arc::new(MockProvider::new());
    script_climate(&provider);
    let orchestrator = Orchestrator::from_router(router_with(provider.clone()), config());

    let response = orchestrator
        .execute(ExecuteRequest::new(CLIMATE, "user-1"))
        .await
        .unwrap();

    assert_eq!(response.status, ExecutionStatus::Success);
    assert!(response.is_chained());
    assert_eq!(
        response.workflow.step_types(),
        vec![
            StepType::Research,
            StepType::PromptOptimization,
            StepType::TextGeneration,
            StepType::ImageGeneration,
            StepType::FinalComposition,
        ]
    );
    assert_eq!(
        response.final_content(),
        "Here is your climate infographic presentation."
    );
    assert_eq!(response.quality_score, 0.92);
    assert!(!response.re_research_performed);

    let requests = provider.requests();
    assert_eq!(requests.len(), 5);

    let compose_prompt = &requests[4].messages.last().unwrap().content;
    assert!(compose_prompt.contains("Global temperatures rose 1.1C since 1900."));
    assert!(compose_prompt.contains("Clean infographic of warming trends"));
    assert!(compose_prompt.contains(CLIMATE));

    let system = &requests[0].messages[0];
    assert_eq!(system.role, MessageRole::System);
    assert!(system.content.contains("Research Analyst"));
}

#[tokio::test]
async fn test_transient_backend_error_is_retried() {
    let provider = Arc::new(MockProvider::new());
    provider.push_error(LlmError::RateLimit);
    script_climate(&provider);
    let orchestrator = Orchestrator::from_router(router_with(provider.clone()), config());

    let response = orchestrator
        .execute(ExecuteRequest::new(CLIMATE, "user-1"))
        .await
        .unwrap();

    assert_eq!(response.status, ExecutionStatus::Success);
    assert_eq!(provider.call_count(), 6);
    assert_eq!(response.total_step_executions, 5);
}

#[tokio::test]
async fn test_flat_prompt_backend() {
    let provider = Arc::new(MockProvider::new().with_flat_prompts());
    script_climate(&provider);
    let orchestrator = Orchestrator::from_router(router_with(provider.clone()), config());

    orchestrator
        .execute(ExecuteRequest::new(CLIMATE, "user-1"))
        .await
        .unwrap();

    for request in provider.requests() {
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
    }
    let last = provider.requests().pop().unwrap();
    assert!(last.messages[0].content.contains("## Previous step outputs"));
}

#[tokio::test]
async fn test_image_request_is_rendered() {
    let provider = Arc::new(MockProvider::new());
    provider.push_response(
        r#"{"optimizedPrompt":"Cyberpunk city at night, neon reflections on wet streets"}"#,
    );
    provider.push_response(
        r#"{"imagePrompt":"Cyberpunk city at night, neon reflections","style":"cinematic","aspectRatio":"16:9"}"#,
    );
    provider.push_response(r#"{"response":"Your cyberpunk city is ready.","qualityScore":0.88}"#);

    let images = Arc::new(MockImageGenerator::new());
    let orchestrator = Orchestrator::from_router(router_with(provider), config())
        .with_image_generator(images.clone());

    let response = orchestrator
        .execute(ExecuteRequest::new(CYBERPUNK, "user-2"))
        .await
        .unwrap();

    assert_eq!(response.status, ExecutionStatus::Success);
    let image_step = response
        .execution
        .steps
        .iter()
        .find(|s| s.purpose == StepType::ImageGeneration)
        .unwrap();
    assert_eq!(
        image_step.metadata.image_url.as_deref(),
        Some("https://images.example.test/1.png")
    );
    assert_eq!(images.requests()[0].aspect_ratio, "16:9");
}

#[tokio::test]
async fn test_unreachable_backend_fails_without_panicking() {
    let provider = Arc::new(MockProvider::new());
    for _ in 0..10 {
        provider.push_error(LlmError::Api("invalid api key".to_string()));
    }
    let orchestrator = Orchestrator::from_router(router_with(provider), config());

    let response = orchestrator
        .execute(ExecuteRequest::new(CYBERPUNK, "user-3"))
        .await
        .unwrap();

    assert_eq!(response.status, ExecutionStatus::Failed);
    assert!(response.error.is_some());
    assert!(response
        .execution
        .steps
        .iter()
        .any(|s| s.status == StepStatus::Skipped));
}
