//! Web API module for Forefront
//!
//! Provides REST API endpoints for:
//! - Chat: one request through the orchestrator, with per-session history
//! - Health checks

pub mod chat;
pub mod health;

use axum::Router;
use serde::Serialize;

pub use chat::{chat_routes, ChatState};
pub use health::health_routes;

/// Create the API router with all endpoints
pub fn api_router(chat_state: ChatState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(chat_routes(chat_state))
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// A failed outcome that still carries a payload
    pub fn failure(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }
}
