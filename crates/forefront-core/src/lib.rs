//! Forefront Core - Orchestration Engine
//!
//! This crate turns a free-form request into a planned, multi-step model
//! workflow and runs it, including:
//! - Intent: Heuristic and model-backed request classification
//! - Semantics: Action, subject, entity and specificity extraction
//! - Workflow: Dynamic step planning from intent and semantics
//! - Roles: Persona prompts and typed step outputs
//! - Envelope: Per-step prompt material with prior step outputs
//! - Dispatch: The seam between the orchestrator and model backends
//! - Orchestrator: Step execution, quality gate and bounded re-research
//! - Utils: Retry logic

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod intent;
pub mod orchestrator;
pub mod roles;
pub mod semantics;
pub mod utils;
pub mod workflow;

pub use dispatch::{DispatchRequest, DispatchResponse, ModelDispatch, RouterDispatch};
pub use envelope::{Envelope, PriorStep};
pub use error::{format_error_for_cli, Error, Result, UserFriendlyError};
pub use intent::{
    classify, Capabilities, ClassificationOutcome, Complexity, DeliveryFormat, Domain,
    HeuristicClassifier, Intent, IntentClassifier, LlmIntentClassifier, TaskType,
};
pub use orchestrator::{
    ConversationTurn, ExecuteRequest, ExecutionStatus, Orchestrator, OrchestratorConfig,
    OrchestratorResponse, RequestContext, ResponseBody, ResponseKind, StepResult, StepStatus,
    WorkflowExecution, MAX_RE_RESEARCH_CAP,
};
pub use roles::{
    all_roles, get_system_prompt_for_purpose, role_for, RoleOutput, RolePrompt, StepType,
};
pub use semantics::{analyze_semantics, enhance_intent_with_semantics, Semantics, Specificity};
pub use utils::{retry_with_backoff, RetryConfig, RetryError};
pub use workflow::{build_dynamic_workflow, StepSpec, Workflow, WorkflowBuilder, WorkflowType};
