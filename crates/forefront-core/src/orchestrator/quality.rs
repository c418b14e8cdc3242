//! Quality gate
//!
//! The composer's self-assessment wins when it gave one. Otherwise the score
//! blends the share of successful steps with the length of the answer.

use super::types::{StepResult, StepStatus};
use crate::roles::StepType;

/// Answer length at which the length component saturates
const SATURATION_CHARS: f64 = 800.0;

/// Score the results of one pass in `[0, 1]`
pub(crate) fn score_results(results: &[StepResult]) -> f64 {
    let composed = results
        .last()
        .filter(|r| r.purpose == StepType::FinalComposition)
        .and_then(|r| r.output.as_ref())
        .and_then(|o| o.self_score());
    if let Some(score) = composed {
        return score.clamp(0.0, 1.0);
    }
    heuristic_score(results)
}

fn heuristic_score(results: &[StepResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let successes = results
        .iter()
        .filter(|r| r.status == StepStatus::Success)
        .count();
    let success_ratio = successes as f64 / results.len() as f64;

    let answer_chars = results
        .iter()
        .rev()
        .find_map(StepResult::display_text)
        .map_or(0, |text| text.chars().count());
    let length_score = (answer_chars as f64 / SATURATION_CHARS).min(1.0);

    0.5 * success_ratio + 0.5 * length_score
}

/// Instructions for the research step of a re-research pass
pub(crate) fn refinement_instructions(score: f64, threshold: f64, previous_answer: &str) -> String {
    let excerpt: String = previous_answer.chars().take(400).collect();
    format!(
        "A previous answer to this request scored {score:.2}, below the required {threshold:.2}. \
         Research the request again more thoroughly, filling the gaps with cited \
         sources.\nPrevious answer excerpt:\n{excerpt}"
    )
}
