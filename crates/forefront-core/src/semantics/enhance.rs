use super::{Semantics, Specificity};
use crate::intent::{Complexity, DeliveryFormat, Domain, Intent, TaskType};

/// Classifier confidence at or above which semantics never override
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Below this the classifier found no decisive domain cue
const AMBIGUOUS_CONFIDENCE: f64 = 0.5;

const RESEARCH_ACTIONS: &[&str] = &["research", "compare", "investigate"];

/// Refine an intent with semantic features.
///
/// Only fills gaps: capability flags may be switched on, complexity may be
/// raised from trivial, and domain/task type are taken from the action only
/// when the classifier had no decisive cue. A high-confidence intent is
/// returned unchanged.
#[must_use]
pub fn enhance_intent_with_semantics(intent: Intent, semantics: &Semantics) -> Intent {
    if intent.confidence >= HIGH_CONFIDENCE {
        return intent;
    }
    let mut intent = intent;
    let action = semantics.primary_action.as_str();

    if (intent.is_degraded() || intent.confidence < AMBIGUOUS_CONFIDENCE) && !action.is_empty() {
        if let Some((task_type, domain)) = action_shape(action) {
            intent.task_type = task_type;
            intent.domain = domain;
        }
    }

    if RESEARCH_ACTIONS.contains(&action) {
        intent.capabilities.needs_research = true;
    }

    let media = matches!(
        intent.delivery_format,
        DeliveryFormat::Visual | DeliveryFormat::Multimedia
    );
    if semantics.specificity == Specificity::Low
        && media
        && intent.task_type == TaskType::Generation
    {
        intent.capabilities.needs_optimization = true;
    }

    if semantics.entities.len() >= 3 && intent.complexity == Complexity::Trivial {
        intent.complexity = Complexity::Moderate;
    }

    intent
}

fn action_shape(action: &str) -> Option<(TaskType, Domain)> {
    let shape = match action {
        "generate" | "create" | "write" | "draw" | "compose" | "produce" | "render" | "make" => {
            (TaskType::Generation, Domain::Creative)
        }
        "design" | "build" => (TaskType::Generation, Domain::Technical),
        "research" | "compare" | "investigate" => (TaskType::Research, Domain::Analytical),
        "analyze" | "analyse" | "evaluate" | "assess" | "review" => {
            (TaskType::Analysis, Domain::Analytical)
        }
        "debug" | "fix" | "test" | "deploy" => (TaskType::Analysis, Domain::Technical),
        "optimize" | "optimise" | "improve" | "refactor" => {
            (TaskType::Optimization, Domain::Technical)
        }
        "explain" | "teach" | "learn" | "describe" => (TaskType::Teaching, Domain::Learning),
        _ => return None,
    };
    Some(shape)
}
