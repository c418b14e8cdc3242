//! Orchestrator result types
//!
//! Contains the records produced by one `execute()` call:
//! - `StepResult` and `StepMetadata` for each executed step
//! - `WorkflowExecution` for the aggregate of a run
//! - `OrchestratorResponse` with its embedded legacy `ResponseBody`

use crate::intent::Intent;
use crate::roles::{Citation, RoleOutput, StepType};
use crate::semantics::Semantics;
use crate::workflow::Workflow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionStatus {
    /// Steps are still executing
    Running,
    /// Every step succeeded
    Success,
    /// Some steps failed but an answer was produced
    PartialFailure,
    /// A required step failed with no fallback
    Failed,
    /// The caller cancelled between steps
    Cancelled,
}

/// Outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Parsed output matching the role's schema
    Success,
    /// Backend failure or schema mismatch; output may be a fallback
    Failed,
    /// Never executed
    Skipped,
}

/// Diagnostics attached to a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMetadata {
    /// Wall time of the step
    pub duration_ms: u64,
    /// Self-reported quality or confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    /// Sources from research output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    /// Rendered image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Aspect ratio of visual output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// Successful candidates of an aggregated step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus_candidates: Option<usize>,
    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Recorded outcome of one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    /// 1-based ordinal within the returned steps
    pub step: usize,
    /// Step purpose
    pub purpose: StepType,
    /// Model that served the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Outcome
    pub status: StepStatus,
    /// Parsed or fallback output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<RoleOutput>,
    /// Diagnostics
    pub metadata: StepMetadata,
    /// Wall time of the step
    pub execution_time_ms: u64,
}

impl StepResult {
    /// A step that never ran
    #[must_use]
    pub fn skipped(step: usize, purpose: StepType) -> Self {
        Self {
            step,
            purpose,
            model: None,
            status: StepStatus::Skipped,
            output: None,
            metadata: StepMetadata::default(),
            execution_time_ms: 0,
        }
    }

    /// Text a user would read for this step, preferring a rendered image
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        if let Some(url) = &self.metadata.image_url {
            return Some(url.clone());
        }
        self.output.as_ref().map(RoleOutput::display_text)
    }
}

/// Aggregate of all step results of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    /// Step results of the final pass, in order
    pub steps: Vec<StepResult>,
    /// Overall status
    pub status: ExecutionStatus,
    /// Composer self-assessment or heuristic score
    pub quality_score: f64,
    /// When execution started
    pub started_at: DateTime<Utc>,
}

/// Response kind of a single-step answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Prose
    Text,
    /// Image or visual direction
    Image,
    /// Source code
    Code,
}

impl From<StepType> for ResponseKind {
    fn from(step_type: StepType) -> Self {
        match step_type {
            StepType::ImageGeneration => ResponseKind::Image,
            StepType::CodeGeneration => ResponseKind::Code,
            _ => ResponseKind::Text,
        }
    }
}

/// Metadata of a single-step answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleMetadata {
    /// Response kind
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    /// Model that served the step
    pub model_used: String,
    /// Wall time of the call
    pub execution_time_ms: u64,
    /// Research sources, when any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
    /// Aspect ratio of visual output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// Rendered image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Legacy response body, single or chained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Multi-step plan: every step is exposed
    #[serde(rename_all = "camelCase")]
    Chained {
        /// Always `true`
        is_chained: bool,
        /// Step results in order
        steps: Vec<StepResult>,
        /// Classified intent
        intent: Intent,
        /// Wall time of the whole run
        total_execution_time_ms: u64,
    },
    /// One-step plan: the lone step's output
    Single {
        /// Answer text
        content: String,
        /// Answer metadata
        metadata: SingleMetadata,
    },
}

impl ResponseBody {
    /// Whether this is the chained shape
    #[must_use]
    pub fn is_chained(&self) -> bool {
        matches!(self, ResponseBody::Chained { .. })
    }
}

/// Everything one `execute()` call returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorResponse {
    /// Trace identifier of this call
    pub execution_id: Uuid,
    /// Overall status
    pub status: ExecutionStatus,
    /// Classified and enhanced intent
    pub intent: Intent,
    /// Semantic features
    pub semantics: Semantics,
    /// The plan as first built
    pub workflow: Workflow,
    /// Step results and aggregate status
    pub execution: WorkflowExecution,
    /// Final quality score in `[0, 1]`
    pub quality_score: f64,
    /// Whether at least one re-research pass ran
    pub re_research_performed: bool,
    /// Number of re-research passes
    pub re_research_iterations: u32,
    /// Step executions across all passes
    pub total_step_executions: usize,
    /// Wall time of the whole run
    pub total_execution_time_ms: u64,
    /// Legacy single/chained projection
    pub body: ResponseBody,
    /// Why the run was aborted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrchestratorResponse {
    /// Text to show the user
    #[must_use]
    pub fn final_content(&self) -> String {
        match &self.body {
            ResponseBody::Single { content, .. } => content.clone(),
            ResponseBody::Chained { steps, .. } => steps
                .iter()
                .rev()
                .find_map(StepResult::display_text)
                .unwrap_or_default(),
        }
    }

    /// Whether the legacy body is chained
    #[must_use]
    pub fn is_chained(&self) -> bool {
        self.body.is_chained()
    }
}
