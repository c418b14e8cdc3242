//! Orchestrator main execution loop
//!
//! Contains `execute` and the phase transitions of the run state machine.

use std::time::Instant;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::config::ExecuteRequest;
use super::core::Orchestrator;
use super::quality::{refinement_instructions, score_results};
use super::state::{Phase, RunState};
use super::types::{OrchestratorResponse, StepResult};
use crate::error::Result;
use crate::roles::{role_for, RoleOutput, StepType};
use crate::semantics::{analyze_semantics, enhance_intent_with_semantics};

impl Orchestrator {
    /// Run one request through the whole pipeline.
    ///
    /// Step failures never surface as `Err`: they are recorded on the step
    /// results, and an aborted run comes back as an `Ok` response with
    /// status `failed` and `error` set.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid configuration or a step purpose
    /// without a registered role.
    pub async fn execute(&self, request: ExecuteRequest) -> Result<OrchestratorResponse> {
        self.execute_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), abandoning remaining steps once
    /// `cancel` fires. The step in flight is allowed to finish.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    #[instrument(skip(self, request, cancel), fields(user = %request.user_id))]
    pub async fn execute_with_cancel(
        &self,
        request: ExecuteRequest,
        cancel: CancellationToken,
    ) -> Result<OrchestratorResponse> {
        self.config.validate()?;

        let started = Instant::now();
        let started_at = Utc::now();
        let execution_id = Uuid::new_v4();
        let limit = self.config.re_research_limit();
        let mut run = RunState::new();

        info!(
            execution_id = %execution_id,
            classifier = self.classifier.name(),
            "Starting execution"
        );

        loop {
            run.phase = match run.phase {
                Phase::Planning => self.plan(&request, &mut run).await?,
                Phase::Executing(index) => {
                    self.execute_phase(index, &request, &cancel, &mut run)
                        .await?
                }
                Phase::QualityCheck => self.quality_check(limit, &mut run),
                Phase::ReResearching(pass) => {
                    run.re_research_iterations = pass;
                    let resume = run.rewind_to_research();
                    info!(
                        execution_id = %execution_id,
                        pass,
                        resume_step = resume + 1,
                        "Re-researching"
                    );
                    Phase::Executing(resume)
                }
                Phase::Done | Phase::Failed => break,
            };
        }

        let response = self.build_response(execution_id, started, started_at, run)?;

        info!(
            execution_id = %execution_id,
            status = ?response.status,
            quality_score = response.quality_score,
            steps = response.execution.steps.len(),
            re_research_iterations = response.re_research_iterations,
            duration_ms = response.total_execution_time_ms,
            "Execution finished"
        );

        Ok(response)
    }

    async fn plan(&self, request: &ExecuteRequest, run: &mut RunState) -> Result<Phase> {
        let message = request.message.as_str();
        let (intent, semantics) = tokio::join!(self.classifier.classify(message), async {
            analyze_semantics(message)
        });
        let intent = enhance_intent_with_semantics(intent, &semantics);
        let workflow = self.workflow_builder.build(&intent, &semantics);

        for spec in &workflow.steps {
            role_for(spec.step_type)?;
        }

        info!(
            domain = %intent.domain,
            task_type = %intent.task_type,
            complexity = %intent.complexity,
            delivery_format = %intent.delivery_format,
            workflow_type = %workflow.workflow_type,
            steps = workflow.steps.len(),
            "Planned workflow"
        );

        run.plan = workflow.steps.clone();
        run.intent = Some(intent);
        run.semantics = Some(semantics);
        run.workflow = Some(workflow);
        Ok(Phase::Executing(0))
    }

    async fn execute_phase(
        &self,
        index: usize,
        request: &ExecuteRequest,
        cancel: &CancellationToken,
        run: &mut RunState,
    ) -> Result<Phase> {
        if index >= run.plan.len() {
            return Ok(Phase::QualityCheck);
        }
        if cancel.is_cancelled() {
            warn!(next_step = index + 1, "Execution cancelled, skipping remaining steps");
            run.cancelled = true;
            run.skip_remaining();
            return Ok(Phase::Done);
        }

        let spec = run.plan[index].clone();
        let result = self
            .run_step(request, run.refinement.as_deref(), index, &spec, &run.results)
            .await?;
        run.total_step_executions += 1;

        let lost = !result.output.as_ref().is_some_and(RoleOutput::is_usable);
        run.results.push(result);

        if spec.required && lost {
            return Ok(abort(
                run,
                format!("required step {} ({}) failed", index + 1, spec.step_type),
            ));
        }

        let composing_next = run
            .plan
            .get(index + 1)
            .is_some_and(|s| s.step_type == StepType::FinalComposition);
        if composing_next && !run.has_generation_output() {
            return Ok(abort(
                run,
                "no generation step produced output to compose".to_string(),
            ));
        }

        Ok(Phase::Executing(index + 1))
    }

    fn quality_check(&self, limit: u32, run: &mut RunState) -> Phase {
        let score = score_results(&run.results);
        let threshold = self.config.quality_threshold;
        let composed = run
            .plan
            .last()
            .is_some_and(|s| s.step_type == StepType::FinalComposition);

        if composed && score < threshold && run.re_research_iterations < limit {
            info!(
                quality_score = score,
                threshold,
                pass = run.re_research_iterations + 1,
                "Quality below threshold"
            );
            let previous = run
                .results
                .last()
                .and_then(StepResult::display_text)
                .unwrap_or_default();
            run.refinement = Some(refinement_instructions(score, threshold, &previous));
            return Phase::ReResearching(run.re_research_iterations + 1);
        }

        if composed && score < threshold {
            warn!(
                quality_score = score,
                threshold, "Re-research budget exhausted, returning best available answer"
            );
        }
        Phase::Done
    }
}

fn abort(run: &mut RunState, reason: String) -> Phase {
    error!(reason = %reason, "Workflow aborted");
    run.abort_reason = Some(reason);
    run.skip_remaining();
    Phase::Failed
}
