//! Result building helpers for the Orchestrator
//!
//! Turns a finished run into an `OrchestratorResponse`, including the legacy
//! single/chained body.

use std::time::Instant;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::core::Orchestrator;
use super::quality::score_results;
use super::state::RunState;
use super::types::{
    ExecutionStatus, OrchestratorResponse, ResponseBody, SingleMetadata, StepResult, StepStatus,
    WorkflowExecution,
};
use crate::error::{Error, Result};

impl Orchestrator {
    /// Build the response for a finished run
    pub(super) fn build_response(
        &self,
        execution_id: Uuid,
        started: Instant,
        started_at: DateTime<Utc>,
        run: RunState,
    ) -> Result<OrchestratorResponse> {
        let status = final_status(&run);
        let quality_score = score_results(&run.results);
        let total_execution_time_ms = started.elapsed().as_millis() as u64;

        let (Some(intent), Some(semantics), Some(workflow)) =
            (run.intent, run.semantics, run.workflow)
        else {
            return Err(Error::Internal("run finished without a plan".to_string()));
        };

        let body = if run.plan.len() == 1 {
            let lone = run
                .results
                .first()
                .ok_or_else(|| Error::Internal("single-step run has no result".to_string()))?;
            single_body(lone)
        } else {
            ResponseBody::Chained {
                is_chained: true,
                steps: run.results.clone(),
                intent: intent.clone(),
                total_execution_time_ms,
            }
        };

        Ok(OrchestratorResponse {
            execution_id,
            status,
            intent,
            semantics,
            workflow,
            execution: WorkflowExecution {
                steps: run.results,
                status,
                quality_score,
                started_at,
            },
            quality_score,
            re_research_performed: run.re_research_iterations > 0,
            re_research_iterations: run.re_research_iterations,
            total_step_executions: run.total_step_executions,
            total_execution_time_ms,
            body,
            error: run.abort_reason,
        })
    }
}

fn final_status(run: &RunState) -> ExecutionStatus {
    if run.cancelled {
        ExecutionStatus::Cancelled
    } else if run.abort_reason.is_some() {
        ExecutionStatus::Failed
    } else if run
        .results
        .iter()
        .all(|r| r.status == StepStatus::Success)
    {
        ExecutionStatus::Success
    } else if run.results.iter().any(|r| r.output.is_some()) {
        ExecutionStatus::PartialFailure
    } else {
        ExecutionStatus::Failed
    }
}

fn single_body(result: &StepResult) -> ResponseBody {
    let citations = &result.metadata.citations;
    ResponseBody::Single {
        content: result.display_text().unwrap_or_default(),
        metadata: SingleMetadata {
            kind: result.purpose.into(),
            model_used: result.model.clone().unwrap_or_default(),
            execution_time_ms: result.execution_time_ms,
            citations: (!citations.is_empty()).then(|| citations.clone()),
            aspect_ratio: result.metadata.aspect_ratio.clone(),
            image_url: result.metadata.image_url.clone(),
        },
    }
}
