//! Images - image generation backends
//!
//! The Art Director role only produces a visual direction (prompt, style,
//! aspect ratio). Rendering that direction into an actual image is the job of
//! an [`ImageGenerator`].
//!
//! # Module Structure
//!
//! - `openai`: OpenAI-compatible `/images/generations` client
//! - `mock`: Scripted generator for tests

mod mock;
mod openai;

pub use mock::MockImageGenerator;
pub use openai::{OpenAiImageConfig, OpenAiImageGenerator};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Request to render one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Fully-crafted image prompt
    pub prompt: String,
    /// Aspect ratio such as `16:9` or `1:1`
    pub aspect_ratio: String,
    /// Model override (empty = generator default)
    #[serde(default)]
    pub model: String,
}

impl ImageRequest {
    /// Create a request with a square aspect ratio
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: "1:1".to_string(),
            model: String::new(),
        }
    }

    /// Set the aspect ratio
    #[must_use]
    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = ratio.into();
        self
    }

    /// Pixel size for OpenAI-style endpoints.
    ///
    /// Landscape ratios map to 1792x1024, portrait ratios to 1024x1792,
    /// anything else (including malformed input) to 1024x1024.
    #[must_use]
    pub fn pixel_size(&self) -> &'static str {
        let parsed = self
            .aspect_ratio
            .split_once(':')
            .and_then(|(w, h)| Some((w.trim().parse::<f32>().ok()?, h.trim().parse::<f32>().ok()?)));

        match parsed {
            Some((w, h)) if h > 0.0 && w / h > 1.2 => "1792x1024",
            Some((w, h)) if h > 0.0 && w / h < 0.83 => "1024x1792",
            _ => "1024x1024",
        }
    }
}

/// A rendered image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Where the rendered image can be fetched
    pub url: String,
    /// Prompt after any backend-side rewriting
    pub revised_prompt: Option<String>,
    /// Model that rendered the image
    pub model: String,
}

/// Trait for image generation backends
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generator name
    fn name(&self) -> &str;

    /// Render an image
    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size() {
        assert_eq!(ImageRequest::new("a").pixel_size(), "1024x1024");
        assert_eq!(
            ImageRequest::new("a").with_aspect_ratio("16:9").pixel_size(),
            "1792x1024"
        );
        assert_eq!(
            ImageRequest::new("a").with_aspect_ratio("9:16").pixel_size(),
            "1024x1792"
        );
        assert_eq!(
            ImageRequest::new("a").with_aspect_ratio("wide").pixel_size(),
            "1024x1024"
        );
        assert_eq!(
            ImageRequest::new("a").with_aspect_ratio("4:0").pixel_size(),
            "1024x1024"
        );
    }

    #[tokio::test]
    async fn test_mock_generator() {
        let generator = MockImageGenerator::new();
        let response = generator
            .generate(ImageRequest::new("neon city").with_aspect_ratio("16:9"))
            .await
            .unwrap();
        assert!(response.url.starts_with("https://images.example.test/"));
        assert_eq!(generator.requests()[0].prompt, "neon city");

        let failing = MockImageGenerator::failing();
        assert!(failing.generate(ImageRequest::new("x")).await.is_err());
    }
}
