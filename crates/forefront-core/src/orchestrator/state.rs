//! Run state machine
//!
//! ```text
//! Planning -> Executing(0) -> .. -> Executing(n) -> QualityCheck -> Done
//!                 ^                                      |
//!                 +---------- ReResearching(k) <---------+   (k <= limit)
//! any Executing(i) -> Failed   (required step lost, nothing to compose)
//! ```

use super::types::StepResult;
use crate::intent::Intent;
use crate::roles::{RoleOutput, StepType};
use crate::semantics::Semantics;
use crate::workflow::{StepSpec, Workflow};

/// Pipeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Classify, analyze and build the plan
    Planning,
    /// Run the step at this index of the current plan
    Executing(usize),
    /// Score the composed answer
    QualityCheck,
    /// Start re-research pass number `n`
    ReResearching(u32),
    /// Finished with an answer
    Done,
    /// Aborted
    Failed,
}

/// Everything one run accumulates
pub(crate) struct RunState {
    pub(crate) phase: Phase,
    pub(crate) intent: Option<Intent>,
    pub(crate) semantics: Option<Semantics>,
    pub(crate) workflow: Option<Workflow>,
    /// Plan of the current pass; may gain a research step on re-research
    pub(crate) plan: Vec<StepSpec>,
    /// Results of the current pass, index-aligned with `plan`
    pub(crate) results: Vec<StepResult>,
    pub(crate) re_research_iterations: u32,
    pub(crate) total_step_executions: usize,
    /// Extra research instructions for a re-research pass
    pub(crate) refinement: Option<String>,
    pub(crate) abort_reason: Option<String>,
    pub(crate) cancelled: bool,
}

impl RunState {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::Planning,
            intent: None,
            semantics: None,
            workflow: None,
            plan: Vec::new(),
            results: Vec::new(),
            re_research_iterations: 0,
            total_step_executions: 0,
            refinement: None,
            abort_reason: None,
            cancelled: false,
        }
    }

    /// Record every not-yet-executed step of the plan as skipped
    pub(crate) fn skip_remaining(&mut self) {
        for index in self.results.len()..self.plan.len() {
            let purpose = self.plan[index].step_type;
            self.results.push(StepResult::skipped(index + 1, purpose));
        }
    }

    /// Whether any generation step produced output
    pub(crate) fn has_generation_output(&self) -> bool {
        self.results
            .iter()
            .any(|r| {
                r.purpose.is_generation() && r.output.as_ref().is_some_and(RoleOutput::is_usable)
            })
    }

    /// Point the plan back at research for another pass.
    ///
    /// Results from the research step onward are discarded; without a
    /// research step one is inserted at the front. Returns the index to
    /// resume from.
    pub(crate) fn rewind_to_research(&mut self) -> usize {
        let index = match self
            .plan
            .iter()
            .position(|s| s.step_type == StepType::Research)
        {
            Some(index) => index,
            None => {
                self.plan.insert(0, StepSpec::new(StepType::Research));
                0
            }
        };
        self.results.truncate(index);
        index
    }
}
