//! Orchestrator - Main execution pipeline
//!
//! This module ties together intent classification, semantic analysis,
//! workflow planning and role-prompted model dispatch.
//!
//! # Module Structure
//!
//! - `types`: Result types (StepResult, OrchestratorResponse, etc.)
//! - `config`: Configuration types (OrchestratorConfig, ExecuteRequest)
//! - `core`: Orchestrator struct and builder methods
//! - `state`: Run state machine
//! - `process`: Main execution loop and phase transitions
//! - `step_execution`: One step, consensus fan-out and fallbacks
//! - `quality`: Quality gate and re-research instructions
//! - `result_builder`: Response assembly

mod config;
mod core;
mod process;
mod quality;
mod result_builder;
mod state;
mod step_execution;
mod types;


// Re-export public types
pub use config::{
    ConversationTurn, ExecuteRequest, OrchestratorConfig, RequestContext, MAX_RE_RESEARCH_CAP,
};
pub use core::Orchestrator;
pub use types::{
    ExecutionStatus, OrchestratorResponse, ResponseBody, ResponseKind, SingleMetadata,
    StepMetadata, StepResult, StepStatus, WorkflowExecution,
};
