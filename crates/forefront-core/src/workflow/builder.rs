//! Dynamic workflow construction
//!
//! Steps are chosen in a fixed order: research, prompt optimization, the
//! generation steps for the delivery format, then composition when more than
//! one step was planned.

use super::types::{StepSpec, Workflow, WorkflowType};
use crate::intent::{DeliveryFormat, Domain, Intent};
use crate::roles::StepType;
use crate::semantics::{Semantics, Specificity};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Builds workflows, optionally pinning model hints per step type
#[derive(Debug, Clone, Default)]
pub struct WorkflowBuilder {
    model_hints: HashMap<StepType, String>,
}

impl WorkflowBuilder {
    /// Builder without model hints
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer `model` for every step of `step_type`
    #[must_use]
    pub fn with_model_hint(mut self, step_type: StepType, model: impl Into<String>) -> Self {
        self.model_hints.insert(step_type, model.into());
        self
    }

    /// Plan the steps for an intent. Never returns an empty plan.
    #[must_use]
    pub fn build(&self, intent: &Intent, semantics: &Semantics) -> Workflow {
        let generation = generation_steps(intent.delivery_format);
        let caps = &intent.capabilities;

        let needs_optimization = caps.needs_optimization
            || (semantics.specificity == Specificity::Low
                && generation.contains(&StepType::ImageGeneration));

        let mut steps: Vec<StepSpec> = Vec::new();
        if caps.needs_research {
            steps.push(StepSpec::new(StepType::Research));
        }
        if needs_optimization {
            steps.push(StepSpec::new(StepType::PromptOptimization));
        }
        let sole_generation = generation.len() == 1;
        for step_type in generation {
            let mut spec = StepSpec::new(step_type);
            spec.required = sole_generation;
            steps.push(spec);
        }
        if steps.len() >= 2 {
            steps.push(StepSpec::new(StepType::FinalComposition));
        }

        let aggregate = caps.needs_multi_model_consensus || intent.domain == Domain::Hybrid;
        if aggregate {
            if let Some(last) = steps.last_mut() {
                last.aggregate = true;
            }
        }

        for step in &mut steps {
            step.model_hint = self.model_hints.get(&step.step_type).cloned();
        }

        let workflow_type = classify_shape(&steps, caps.needs_research, needs_optimization);
        let estimated_time_secs = steps.iter().map(StepSpec::estimated_secs).sum();

        let workflow = Workflow {
            workflow_id: Uuid::new_v4(),
            workflow_type,
            steps,
            estimated_time_secs,
        };

        debug!(
            workflow_id = %workflow.workflow_id,
            workflow_type = %workflow.workflow_type,
            steps = workflow.steps.len(),
            "Built workflow"
        );

        workflow
    }
}

/// Plan the steps for an intent with the default builder
#[must_use]
pub fn build_dynamic_workflow(intent: &Intent, semantics: &Semantics) -> Workflow {
    WorkflowBuilder::new().build(intent, semantics)
}

fn generation_steps(delivery: DeliveryFormat) -> Vec<StepType> {
    match delivery {
        DeliveryFormat::Text => vec![StepType::TextGeneration],
        DeliveryFormat::Visual => vec![StepType::ImageGeneration],
        DeliveryFormat::Multimedia => vec![StepType::TextGeneration, StepType::ImageGeneration],
        DeliveryFormat::Code | DeliveryFormat::Interactive => vec![StepType::CodeGeneration],
    }
}

fn classify_shape(steps: &[StepSpec], research: bool, optimization: bool) -> WorkflowType {
    if steps.len() == 1 {
        return WorkflowType::SingleStep;
    }
    if steps.iter().any(|s| s.aggregate) {
        return WorkflowType::ConsensusChain;
    }
    match (research, optimization) {
        (true, true) => WorkflowType::ResearchOptimizeGenerate,
        (true, false) => WorkflowType::ResearchThenGenerate,
        (false, true) => WorkflowType::OptimizeThenGenerate,
        (false, false) => WorkflowType::MultiStep,
    }
}
