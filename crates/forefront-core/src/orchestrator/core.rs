//! Orchestrator core structure
//!
//! Contains the main `Orchestrator` struct and its builder methods.

use crate::dispatch::{ModelDispatch, RouterDispatch};
use crate::intent::{HeuristicClassifier, IntentClassifier};
use crate::workflow::WorkflowBuilder;
use forefront_llm::{ImageGenerator, LlmRouter};
use std::sync::Arc;

use super::config::OrchestratorConfig;

/// Runs the classify, plan, execute and compose pipeline
///
/// Holds no per-request state: every call allocates its own intent, plan and
/// step results, so one instance serves concurrent requests.
pub struct Orchestrator {
    pub(crate) dispatcher: Arc<dyn ModelDispatch>,
    pub(crate) classifier: Arc<dyn IntentClassifier>,
    pub(crate) image_generator: Option<Arc<dyn ImageGenerator>>,
    pub(crate) workflow_builder: WorkflowBuilder,
    pub(crate) config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator over a dispatcher with the heuristic classifier
    #[must_use]
    pub fn new(dispatcher: Arc<dyn ModelDispatch>, config: OrchestratorConfig) -> Self {
        Self {
            dispatcher,
            classifier: Arc::new(HeuristicClassifier::new()),
            image_generator: None,
            workflow_builder: WorkflowBuilder::new(),
            config,
        }
    }

    /// Create an orchestrator dispatching through an `LlmRouter`
    #[must_use]
    pub fn from_router(router: Arc<LlmRouter>, config: OrchestratorConfig) -> Self {
        let dispatcher = RouterDispatch::new(router).with_retry(config.retry.clone());
        Self::new(Arc::new(dispatcher), config)
    }

    /// Set the intent classifier
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Render visual direction into images
    #[must_use]
    pub fn with_image_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.image_generator = Some(generator);
        self
    }

    /// Set the workflow builder (model hints per step type)
    #[must_use]
    pub fn with_workflow_builder(mut self, builder: WorkflowBuilder) -> Self {
        self.workflow_builder = builder;
        self
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Name of the active classifier
    #[must_use]
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }
}
