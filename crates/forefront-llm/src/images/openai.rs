use super::{ImageGenerator, ImageRequest, ImageResponse};
use crate::error::{Error, Result};
use crate::util::{mask_api_key, sanitize_api_error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default images endpoint base
pub const IMAGES_BASE_URL: &str = "https://api.openai.com/v1";

/// Default image model
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Configuration for an OpenAI-compatible images endpoint
#[derive(Clone)]
pub struct OpenAiImageConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Default model
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for OpenAiImageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiImageConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiImageConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: IMAGES_BASE_URL.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: Duration::from_secs(90),
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
    revised_prompt: Option<String>,
}

/// OpenAI-compatible image generator
pub struct OpenAiImageGenerator {
    client: Client,
    config: OpenAiImageConfig,
}

impl OpenAiImageGenerator {
    /// Create a new generator
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiImageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Provider(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[async_trait::async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    fn name(&self) -> &str {
        "openai-images"
    }

    #[instrument(skip(self, request), fields(aspect_ratio = %request.aspect_ratio))]
    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse> {
        let model = if request.model.is_empty() {
            self.config.model.as_str()
        } else {
            request.model.as_str()
        };

        let body = GenerationBody {
            model,
            prompt: &request.prompt,
            n: 1,
            size: request.pixel_size(),
        };

        debug!(model, size = body.size, "Requesting image generation");

        let response = self
            .client
            .post(format!("{}/images/generations", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
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

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimit);
        }
        if status.is_server_error() {
            return Err(Error::ServerError {
                status: status.as_u16(),
                message: sanitize_api_error(&text),
            });
        }
        if !status.is_success() {
            return Err(Error::Api(sanitize_api_error(&text)));
        }

        let parsed: GenerationResponse =
            serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let image = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No image in response".to_string()))?;

        let url = image
            .url
            .ok_or_else(|| Error::InvalidResponse("Image response has no url".to_string()))?;

        Ok(ImageResponse {
            url,
            revised_prompt: image.revised_prompt,
            model: model.to_string(),
        })
    }
}
