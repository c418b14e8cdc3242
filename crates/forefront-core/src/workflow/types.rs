//! Workflow plan types

use crate::roles::StepType;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One planned unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSpec {
    /// Purpose; selects the persona
    pub step_type: StepType,
    /// Preferred backend model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_hint: Option<String>,
    /// Later steps cannot proceed without this step's output
    #[serde(default)]
    pub required: bool,
    /// Dispatch to every consensus model and keep the best answer
    #[serde(default)]
    pub aggregate: bool,
}

impl StepSpec {
    /// A plain step with no hint
    #[must_use]
    pub fn new(step_type: StepType) -> Self {
        Self {
            step_type,
            model_hint: None,
            required: false,
            aggregate: false,
        }
    }

    /// Advisory duration of this step in seconds
    #[must_use]
    pub fn estimated_secs(&self) -> u64 {
        let base = match self.step_type {
            StepType::Research => 20,
            StepType::PromptOptimization => 8,
            StepType::ImageGeneration => 30,
            StepType::CodeGeneration => 25,
            StepType::TextGeneration => 15,
            StepType::FinalComposition => 12,
        };
        if self.aggregate {
            base * 2
        } else {
            base
        }
    }
}

/// Shape of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowType {
    /// One generation step
    SingleStep,
    /// Research feeding generation
    ResearchThenGenerate,
    /// Prompt optimization feeding generation
    OptimizeThenGenerate,
    /// Research, optimization, then generation
    ResearchOptimizeGenerate,
    /// Final step cross-checked across models
    ConsensusChain,
    /// Several generation steps merged by composition
    MultiStep,
}

impl WorkflowType {
    /// Wire label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowType::SingleStep => "single-step",
            WorkflowType::ResearchThenGenerate => "research-then-generate",
            WorkflowType::OptimizeThenGenerate => "optimize-then-generate",
            WorkflowType::ResearchOptimizeGenerate => "research-optimize-generate",
            WorkflowType::ConsensusChain => "consensus-chain",
            WorkflowType::MultiStep => "multi-step",
        }
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered plan, not yet executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Trace identifier
    pub workflow_id: Uuid,
    /// Plan shape
    pub workflow_type: WorkflowType,
    /// Steps in execution order, never empty
    pub steps: Vec<StepSpec>,
    /// Advisory duration in seconds
    pub estimated_time_secs: u64,
}

impl Workflow {
    /// Whether the plan ends in a composition step
    #[must_use]
    pub fn is_composed(&self) -> bool {
        self.steps
            .last()
            .is_some_and(|s| s.step_type == StepType::FinalComposition)
    }

    /// Index of the first step of the given type
    #[must_use]
    pub fn position(&self, step_type: StepType) -> Option<usize> {
        self.steps.iter().position(|s| s.step_type == step_type)
    }

    /// Step types in order
    #[must_use]
    pub fn step_types(&self) -> Vec<StepType> {
        self.steps.iter().map(|s| s.step_type).collect()
    }
}
