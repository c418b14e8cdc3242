//! Workflow - ordered execution plans
//!
//! A pure function of intent and semantics: the same inputs always give the
//! same step count and step types (only the workflow id differs).
//!
//! # Module Structure
//!
//! - `types`: Plan data model
//! - `builder`: Step selection

mod builder;
mod types;

#[cfg(test)]
mod tests;

pub use builder::{build_dynamic_workflow, WorkflowBuilder};
pub use types::{StepSpec, Workflow, WorkflowType};
