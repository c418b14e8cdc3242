//! Step execution logic
//!
//! One step = one persona call (or one fan-out across consensus models),
//! schema parsing, optional image rendering and the per-purpose fallback
//! when the call fails.

use std::time::Instant;

use forefront_llm::ImageRequest;
use futures::future::join_all;
use tracing::{debug, instrument, warn};

use super::config::{ConversationTurn, ExecuteRequest};
use super::core::Orchestrator;
use super::types::{StepMetadata, StepResult, StepStatus};
use crate::dispatch::DispatchRequest;
use crate::envelope::{Envelope, PriorStep};
use crate::error::{Error, Result};
use crate::roles::{
    role_for, ComposedOutput, PromptOutput, ResearchOutput, RoleOutput, RolePrompt, StepType,
};
use crate::workflow::StepSpec;

/// Model name recorded for outputs assembled without a backend
const LOCAL_MODEL: &str = "local";

/// A parsed backend answer
struct Served {
    model: String,
    output: RoleOutput,
    candidates: Option<usize>,
}

impl Served {
    /// Ranking for consensus: schema-valid first, then self-reported score
    fn rank(&self) -> (bool, f64) {
        (
            !self.output.is_degraded(),
            self.output.self_score().unwrap_or(0.0),
        )
    }
}

impl Orchestrator {
    /// Execute one planned step against the results of the earlier ones.
    ///
    /// Backend failures are recorded on the returned `StepResult`; only
    /// fatal errors (a missing role) are returned as `Err`.
    #[instrument(skip_all, fields(step = index + 1, purpose = %spec.step_type))]
    pub(super) async fn run_step(
        &self,
        request: &ExecuteRequest,
        refinement: Option<&str>,
        index: usize,
        spec: &StepSpec,
        prior: &[StepResult],
    ) -> Result<StepResult> {
        let started = Instant::now();
        let role = role_for(spec.step_type)?;
        let envelope = self.build_envelope(role, request, refinement, prior);

        let model_hint = if spec.step_type.is_generation() {
            request.model.clone().or_else(|| spec.model_hint.clone())
        } else {
            spec.model_hint.clone()
        };

        let attempt = if spec.aggregate && !self.config.consensus_models.is_empty() {
            self.dispatch_consensus(spec.step_type, &envelope).await
        } else {
            self.dispatch_once(spec.step_type, envelope, model_hint).await
        };

        let mut result = StepResult {
            step: index + 1,
            purpose: spec.step_type,
            model: None,
            status: StepStatus::Success,
            output: None,
            metadata: StepMetadata::default(),
            execution_time_ms: 0,
        };

        match attempt {
            Ok(served) => {
                result.model = Some(served.model);
                result.metadata.consensus_candidates = served.candidates;
                if served.output.is_degraded() {
                    warn!("Answer did not match the role's output schema");
                    result.status = StepStatus::Failed;
                    result.metadata.error =
                        Some("answer did not match the role's output schema".to_string());
                    result.output = match spec.step_type {
                        StepType::PromptOptimization => Some(raw_prompt_fallback(request)),
                        _ if served.output.is_usable() => Some(served.output),
                        _ => fallback_output(spec.step_type, request, prior),
                    };
                } else {
                    result.output = Some(served.output);
                }
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(error = %e, "Step failed, applying fallback");
                result.status = StepStatus::Failed;
                result.metadata.error = Some(e.to_string());
                result.output = fallback_output(spec.step_type, request, prior);
                if result.output.is_some() {
                    result.model = Some(LOCAL_MODEL.to_string());
                }
            }
        }

        let image_request = match &result.output {
            Some(RoleOutput::VisualDirection(visual)) => {
                result.metadata.aspect_ratio = Some(visual.aspect_ratio.clone());
                Some(
                    ImageRequest::new(visual.image_prompt.clone())
                        .with_aspect_ratio(visual.aspect_ratio.clone()),
                )
            }
            _ => None,
        };
        if let Some(image_request) = image_request {
            self.render_image(image_request, &mut result).await;
        }

        if let Some(output) = &result.output {
            result.metadata.citations = output.citations().to_vec();
            result.metadata.quality_score = output.self_score();
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        result.metadata.duration_ms = elapsed_ms;
        result.execution_time_ms = elapsed_ms;

        debug!(
            status = ?result.status,
            model = result.model.as_deref().unwrap_or("-"),
            duration_ms = elapsed_ms,
            "Step finished"
        );

        Ok(result)
    }

    fn build_envelope(
        &self,
        role: &RolePrompt,
        request: &ExecuteRequest,
        refinement: Option<&str>,
        prior: &[StepResult],
    ) -> Envelope {
        let history = request
            .context
            .conversation_history
            .iter()
            .map(ConversationTurn::to_message)
            .collect();

        let prior_steps = prior
            .iter()
            .filter_map(|r| {
                r.output.clone().map(|output| PriorStep {
                    step: r.step,
                    purpose: r.purpose,
                    output,
                })
            })
            .collect();

        let envelope = Envelope::for_role(role, request.message.clone())
            .with_history(history, self.config.history_limit)
            .with_prior_steps(prior_steps);

        match step_instructions(role.step_type, refinement) {
            Some(instructions) => envelope.with_instructions(instructions),
            None => envelope,
        }
    }

    async fn dispatch_once(
        &self,
        step_type: StepType,
        envelope: Envelope,
        model_hint: Option<String>,
    ) -> Result<Served> {
        let request = DispatchRequest {
            step_type,
            envelope,
            model_hint,
        };
        let timeout = self.config.step_timeout;

        let response = tokio::time::timeout(timeout, self.dispatcher.invoke(request))
            .await
            .map_err(|_| Error::StepTimeout {
                step: step_type.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })??;

        Ok(Served {
            output: RoleOutput::parse(step_type, &response.content),
            model: response.model,
            candidates: None,
        })
    }

    /// Fan one step out to every consensus model and keep the best answer.
    /// Ties go to the earliest model in the configured order.
    async fn dispatch_consensus(&self, step_type: StepType, envelope: &Envelope) -> Result<Served> {
        let calls = self.config.consensus_models.iter().map(|model| {
            self.dispatch_once(step_type, envelope.clone(), Some(model.clone()))
        });
        let outcomes = join_all(calls).await;

        let mut best: Option<Served> = None;
        let mut succeeded = 0;
        let mut last_error = None;

        for outcome in outcomes {
            match outcome {
                Ok(served) => {
                    succeeded += 1;
                    if best.as_ref().is_none_or(|b| served.rank() > b.rank()) {
                        best = Some(served);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Consensus candidate failed");
                    last_error = Some(e);
                }
            }
        }

        debug!(
            candidates = self.config.consensus_models.len(),
            succeeded, "Consensus fan-out finished"
        );

        match best {
            Some(mut served) => {
                served.candidates = Some(succeeded);
                Ok(served)
            }
            None => Err(last_error
                .unwrap_or_else(|| Error::Dispatch("no consensus models configured".to_string()))),
        }
    }

    async fn render_image(&self, image_request: ImageRequest, result: &mut StepResult) {
        let Some(generator) = &self.image_generator else {
            return;
        };

        match tokio::time::timeout(self.config.step_timeout, generator.generate(image_request)).await
        {
            Ok(Ok(image)) => {
                debug!(generator = generator.name(), url = %image.url, "Image rendered");
                result.metadata.image_url = Some(image.url);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Image rendering failed");
                result.status = StepStatus::Failed;
                result.metadata.error = Some(format!("image rendering failed: {e}"));
            }
            Err(_) => {
                warn!("Image rendering timed out");
                result.status = StepStatus::Failed;
                result.metadata.error = Some("image rendering timed out".to_string());
            }
        }
    }
}

fn step_instructions(step_type: StepType, refinement: Option<&str>) -> Option<String> {
    let text = match step_type {
        StepType::Research => return refinement.map(str::to_string),
        StepType::PromptOptimization => {
            "Write the prompt the following generation step will receive. \
             Keep every constraint from the user request."
        }
        StepType::ImageGeneration | StepType::CodeGeneration | StepType::TextGeneration => {
            "Follow the optimized prompt from a previous step when there is one, \
             and ground facts in the research output when it is present."
        }
        StepType::FinalComposition => {
            "Merge the previous step outputs into one final answer to the user request."
        }
    };
    Some(text.to_string())
}

fn raw_prompt_fallback(request: &ExecuteRequest) -> RoleOutput {
    RoleOutput::Prompt(PromptOutput {
        optimized_prompt: request.message.clone(),
        negative_prompt: None,
        rationale: None,
    })
}

/// Output substituted when a step's backend call failed
fn fallback_output(
    step_type: StepType,
    request: &ExecuteRequest,
    prior: &[StepResult],
) -> Option<RoleOutput> {
    match step_type {
        StepType::PromptOptimization => Some(raw_prompt_fallback(request)),
        StepType::Research => Some(RoleOutput::Research(ResearchOutput::empty())),
        StepType::FinalComposition => Some(RoleOutput::Composed(ComposedOutput {
            response: compose_locally(prior),
            quality_score: None,
            summary: None,
        })),
        StepType::ImageGeneration | StepType::CodeGeneration | StepType::TextGeneration => None,
    }
}

/// Concatenate generation outputs when the composer is unavailable
fn compose_locally(prior: &[StepResult]) -> String {
    prior
        .iter()
        .filter(|r| r.purpose.is_generation())
        .filter_map(|r| match (&r.metadata.image_url, &r.output) {
            (Some(url), Some(output)) => Some(format!("![{}]({url})", output.display_text())),
            (_, Some(output)) => Some(output.display_text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
