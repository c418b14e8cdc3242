use super::types::{
    model_supports_json_mode, OpenRouterConfig, OpenRouterError, OpenRouterMessage,
    OpenRouterRequest, OpenRouterResponse, ResponseFormat, MODELS,
};
use crate::error::{Error, Result};
use crate::router::{CompletionRequest, CompletionResponse, LlmProvider, Message, TokenUsage};
use crate::util::sanitize_api_error;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

/// OpenRouter LLM provider
pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Provider(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    ///
    /// # Errors
    /// Returns an error if the key is missing or the client cannot be built.
    pub fn from_env(api_key_env: &str) -> Result<Self> {
        Self::new(OpenRouterConfig::from_env(api_key_env)?)
    }

    /// Convert our message to OpenRouter format
    pub(crate) fn convert_message(msg: &Message) -> OpenRouterMessage {
        OpenRouterMessage {
            role: msg.role.as_str().to_string(),
            content: Some(msg.content.clone()),
        }
    }

    /// Map a non-success HTTP status onto our error taxonomy
    pub(crate) fn map_status(status: StatusCode, body: &str) -> Error {
        let message = serde_json::from_str::<OpenRouterError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());
        let message = sanitize_api_error(&message);

        if status == StatusCode::TOO_MANY_REQUESTS {
            Error::RateLimit
        } else if status.is_server_error() {
            Error::ServerError {
                status: status.as_u16(),
                message,
            }
        } else {
            Error::Api(message)
        }
    }

    /// Make API request
    async fn request(&self, body: &OpenRouterRequest) -> Result<OpenRouterResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json");

        if let Some(app_name) = &self.config.app_name {
            request = request.header("X-Title", app_name);
        }
        if let Some(site_url) = &self.config.site_url {
            request = request.header("HTTP-Referer", site_url);
        }

        let response = request.json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(self.config.timeout.as_millis() as u64)
            } else {
                Error::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::map_status(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn available_models(&self) -> Vec<String> {
        let mut models: Vec<String> = MODELS.iter().map(|s| (*s).to_string()).collect();
        if !models.contains(&self.config.default_model) {
            models.push(self.config.default_model.clone());
        }
        models
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn supports_json_mode(&self) -> bool {
        model_supports_json_mode(&self.config.default_model)
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = if request.model.is_empty() {
            self.config.default_model.clone()
        } else {
            request.model.clone()
        };

        let response_format = (request.json_mode && model_supports_json_mode(&model))
            .then_some(ResponseFormat {
                r#type: "json_object",
            });

        let body = OpenRouterRequest {
            model,
            messages: request.messages.iter().map(Self::convert_message).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format,
        };

        debug!("Sending request to OpenRouter API");

        let response = self.request(&body).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
            finish_reason: choice.finish_reason,
            model: response.model,
        })
    }
}
