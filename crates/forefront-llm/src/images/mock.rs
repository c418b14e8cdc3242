use super::{ImageGenerator, ImageRequest, ImageResponse};
use crate::error::{Error, Result};
use std::sync::{Arc, Mutex};

/// Image generator that fabricates deterministic URLs.
#[derive(Default)]
pub struct MockImageGenerator {
    fail: bool,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
}

impl MockImageGenerator {
    /// Create a generator that always succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that always fails with a server error
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl ImageGenerator for MockImageGenerator {
    fn name(&self) -> &str {
        "mock-images"
    }

    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
            requests.push(request.clone());
            requests.len()
        };

        if self.fail {
            return Err(Error::ServerError {
                status: 500,
                message: "image backend unavailable".to_string(),
            });
        }

        Ok(ImageResponse {
            url: format!("https://images.example.test/{index}.png"),
            revised_prompt: None,
            model: "mock-image-model".to_string(),
        })
    }
}
