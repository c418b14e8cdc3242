//! Dispatch - the seam between the orchestrator and model backends
//!
//! The orchestrator only sees [`ModelDispatch`]. [`RouterDispatch`] is the
//! production implementation over `forefront_llm::LlmRouter`; tests supply
//! scripted or mocked dispatchers.

mod router;

pub use router::RouterDispatch;

use crate::envelope::Envelope;
use crate::error::Result;
use crate::roles::StepType;

/// One backend call for one step
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Step purpose, used for model selection
    pub step_type: StepType,
    /// Prompt material
    pub envelope: Envelope,
    /// Preferred model; the dispatcher may ignore it
    pub model_hint: Option<String>,
}

/// Raw backend answer
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    /// Model text
    pub content: String,
    /// Model that actually served the call
    pub model: String,
}

/// Invokes a backend model for a step
#[async_trait::async_trait]
pub trait ModelDispatch: Send + Sync {
    /// Send the envelope and return the raw answer
    async fn invoke(&self, request: DispatchRequest) -> Result<DispatchResponse>;
}
