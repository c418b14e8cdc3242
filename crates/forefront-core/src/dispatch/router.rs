//! Dispatch over an `LlmRouter`

use super::{DispatchRequest, DispatchResponse, ModelDispatch};
use crate::error::{Error, Result};
use crate::utils::{retry_with_backoff, RetryConfig};
use forefront_llm::{CompletionRequest, LlmProvider, LlmRouter, Message};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Production dispatcher
///
/// A model hint is honoured when some registered provider advertises that
/// model; otherwise the router's task routing picks provider and model.
/// Transient backend failures are retried per [`RetryConfig`].
pub struct RouterDispatch {
    router: Arc<LlmRouter>,
    retry: RetryConfig,
}

impl RouterDispatch {
    /// Create a dispatcher with the default retry policy
    #[must_use]
    pub fn new(router: Arc<LlmRouter>) -> Self {
        Self {
            router,
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn resolve(&self, request: &DispatchRequest) -> Result<(Arc<dyn LlmProvider>, String)> {
        if let Some(hint) = request.model_hint.as_deref() {
            if let Some(provider) = self.router.provider_for_model(hint) {
                return Ok((provider, hint.to_string()));
            }
            debug!(model = hint, "No provider advertises hinted model, using task routing");
        }

        self.router
            .select_for_task(request.step_type.llm_task())
            .ok_or_else(|| Error::Dispatch(format!("no backend for {}", request.step_type)))
    }
}

#[async_trait::async_trait]
impl ModelDispatch for RouterDispatch {
    #[instrument(skip(self, request), fields(step = %request.step_type))]
    async fn invoke(&self, request: DispatchRequest) -> Result<DispatchResponse> {
        let (provider, model) = self.resolve(&request)?;

        let messages = if provider.supports_structured_prompts() {
            request.envelope.to_messages()
        } else {
            vec![Message::user(request.envelope.to_flat_prompt())]
        };

        let budget = self
            .router
            .routing_rules()
            .get_token_budget(request.step_type.llm_task());

        let completion = CompletionRequest::new(model)
            .with_messages(messages)
            .with_max_tokens(budget.max_tokens)
            .with_temperature(budget.temperature)
            .with_json_mode(provider.supports_json_mode());

        let response = retry_with_backoff(
            &self.retry,
            || provider.complete(completion.clone()),
            forefront_llm::Error::is_transient,
        )
        .await
        .map_err(|e| Error::Llm(e.last_error))?;

        debug!(
            model = %response.model,
            chars = response.content.len(),
            "Backend call completed"
        );

        Ok(DispatchResponse {
            content: response.content,
            model: response.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;
    use crate::roles::{role_for, StepType};
    use forefront_llm::{MessageRole, MockProvider};
    use std::time::Duration;

    fn request(step_type: StepType, hint: Option<&str>) -> DispatchRequest {
        let role = role_for(step_type).unwrap();
        DispatchRequest {
            step_type,
            envelope: Envelope::for_role(role, "Compare React and Vue"),
            model_hint: hint.map(str::to_string),
        }
    }

    fn dispatch(providers: Vec<(&str, Arc<MockProvider>)>) -> RouterDispatch {
        let mut router = LlmRouter::new(providers[0].0);
        for (name, provider) in providers {
            router.register(name, provider);
        }
        RouterDispatch::new(Arc::new(router)).with_retry(
            RetryConfig::default()
                .with_initial_delay(Duration::from_millis(1))
                .with_jitter(false),
        )
    }

    #[tokio::test]
    async fn test_structured_messages_and_budget() {
        let mock = Arc::new(MockProvider::new());
        mock.push_response(r#"{"summary":"ok"}"#);
        let dispatcher = dispatch(vec![("mock", mock.clone())]);

        let response = dispatcher
            .invoke(request(StepType::Research, None))
            .await
            .unwrap();
        assert_eq!(response.content, r#"{"summary":"ok"}"#);

        let sent = &mock.requests()[0];
        assert_eq!(sent.messages[0].role, MessageRole::System);
        assert_eq!(sent.max_tokens, Some(2000));
        assert!(!sent.json_mode);
    }

    #[tokio::test]
    async fn test_flat_prompt_for_single_string_backends() {
        let mock = Arc::new(MockProvider::new().with_flat_prompts());
        let dispatcher = dispatch(vec![("flat", mock.clone())]);

        dispatcher
            .invoke(request(StepType::TextGeneration, None))
            .await
            .unwrap();

        let sent = &mock.requests()[0];
        assert_eq!(sent.messages.len(), 1);
        assert_eq!(sent.messages[0].role, MessageRole::User);
        assert!(sent.messages[0].content.contains("Compare React and Vue"));
    }

    #[tokio::test]
    async fn test_hint_selects_advertising_provider() {
        let default = Arc::new(MockProvider::new());
        let coder = Arc::new(
            MockProvider::new()
                .with_name("coder")
                .with_models(vec!["code-large".to_string()]),
        );
        let dispatcher = dispatch(vec![("default", default.clone()), ("coder", coder.clone())]);

        let response = dispatcher
            .invoke(request(StepType::CodeGeneration, Some("code-large")))
            .await
            .unwrap();
        assert_eq!(response.model, "code-large");
        assert_eq!(coder.call_count(), 1);
        assert_eq!(default.call_count(), 0);

        dispatcher
            .invoke(request(StepType::CodeGeneration, Some("unknown-model")))
            .await
            .unwrap();
        assert_eq!(default.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transient_error_is_retried_once() {
        let mock = Arc::new(MockProvider::new());
        mock.push_error(forefront_llm::Error::RateLimit);
        mock.push_response("second try");
        let dispatcher = dispatch(vec![("mock", mock.clone())]);

        let response = dispatcher
            .invoke(request(StepType::TextGeneration, None))
            .await
            .unwrap();
        assert_eq!(response.content, "second try");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let mock = Arc::new(MockProvider::new());
        mock.push_error(forefront_llm::Error::Api("bad request".to_string()));
        let dispatcher = dispatch(vec![("mock", mock.clone())]);

        let err = dispatcher
            .invoke(request(StepType::TextGeneration, None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Llm(forefront_llm::Error::Api(_))));
        assert_eq!(mock.call_count(), 1);
    }
}
