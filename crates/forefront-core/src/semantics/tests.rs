use super::*;
use crate::intent::{
    Capabilities, ClassificationOutcome, Complexity, DeliveryFormat, Domain, Intent, TaskType,
};

fn intent(confidence: f64) -> Intent {
    Intent {
        domain: Domain::Technical,
        task_type: TaskType::Analysis,
        complexity: Complexity::Trivial,
        delivery_format: DeliveryFormat::Text,
        capabilities: Capabilities::default(),
        confidence,
        outcome: ClassificationOutcome::Classified,
    }
}

fn semantics(action: &str, entities: &[&str], specificity: Specificity) -> Semantics {
    Semantics {
        primary_action: action.to_string(),
        primary_subject: String::new(),
        entities: entities.iter().map(|e| (*e).to_string()).collect(),
        specificity,
    }
}

#[test]
fn test_comparison_query() {
    let s = analyze_semantics("Compare React and Vue for a new project");
    assert_eq!(s.primary_action, "compare");
    assert_eq!(s.primary_subject, "React");
    assert_eq!(s.entities, vec!["React", "Vue"]);
    assert_eq!(s.specificity, Specificity::Medium);
}

#[test]
fn test_image_query_subject_keeps_of_phrase() {
    let s = analyze_semantics("Generate an image of a cyberpunk city at night with neon lights");
    assert_eq!(s.primary_action, "generate");
    assert_eq!(s.primary_subject, "image of cyberpunk city");
    assert!(s.entities.is_empty());
    assert_eq!(s.specificity, Specificity::Medium);
}

#[test]
fn test_subject_stops_at_relative_clause() {
    let s = analyze_semantics("Debug this React component that crashes on mount");
    assert_eq!(s.primary_action, "debug");
    assert_eq!(s.primary_subject, "React component");
    assert_eq!(s.entities, vec!["React"]);
}

#[test]
fn test_inflected_verbs_reduce_to_base_form() {
    assert_eq!(analyze_semantics("Debugging the parser").primary_action, "debug");
    assert_eq!(analyze_semantics("Researched options").primary_action, "research");
    assert_eq!(analyze_semantics("Making a logo").primary_action, "make");
    assert_eq!(analyze_semantics("Fixes for the build").primary_action, "fix");
}

#[test]
fn test_first_word_is_action_without_known_verb() {
    let s = analyze_semantics("weather tomorrow in Paris");
    assert_eq!(s.primary_action, "weather");
    assert_eq!(s.primary_subject, "tomorrow");
    assert_eq!(s.entities, vec!["Paris"]);
}

#[test]
fn test_capitalized_runs_and_dedup() {
    let s = analyze_semantics("Write an essay about New York City history");
    assert_eq!(s.entities, vec!["New York City"]);

    let s = analyze_semantics("Compare Rust and rust with Go");
    assert_eq!(s.entities, vec!["Rust", "Go"]);
}

#[test]
fn test_specificity_levels() {
    let s = analyze_semantics(
        "Build a REST API with Rust, Docker and PostgreSQL that handles 10000 requests per second",
    );
    assert_eq!(s.entities, vec!["REST API", "Rust", "Docker", "PostgreSQL"]);
    assert_eq!(s.specificity, Specificity::High);

    assert_eq!(
        analyze_semantics("make something cool").specificity,
        Specificity::Low
    );
}

#[test]
fn test_empty_query() {
    assert_eq!(analyze_semantics(""), Semantics::empty());
    assert_eq!(analyze_semantics("  ?! "), Semantics::empty());
}

#[test]
fn test_high_confidence_intent_is_untouched() {
    let original = intent(0.9);
    let enhanced = enhance_intent_with_semantics(
        original.clone(),
        &semantics("research", &["A", "B", "C"], Specificity::Low),
    );
    assert_eq!(enhanced, original);
}

#[test]
fn test_research_action_enables_research() {
    let enhanced =
        enhance_intent_with_semantics(intent(0.6), &semantics("compare", &[], Specificity::Medium));
    assert!(enhanced.capabilities.needs_research);
    assert_eq!(enhanced.domain, Domain::Technical);
}

#[test]
fn test_ambiguous_intent_takes_shape_from_action() {
    let enhanced =
        enhance_intent_with_semantics(intent(0.3), &semantics("explain", &[], Specificity::Low));
    assert_eq!(enhanced.domain, Domain::Learning);
    assert_eq!(enhanced.task_type, TaskType::Teaching);

    let unknown =
        enhance_intent_with_semantics(intent(0.3), &semantics("weather", &[], Specificity::Low));
    assert_eq!(unknown, intent(0.3));
}

#[test]
fn test_vague_visual_generation_needs_optimization() {
    let mut visual = intent(0.6);
    visual.task_type = TaskType::Generation;
    visual.delivery_format = DeliveryFormat::Visual;

    let enhanced =
        enhance_intent_with_semantics(visual.clone(), &semantics("draw", &[], Specificity::Low));
    assert!(enhanced.capabilities.needs_optimization);

    let specific =
        enhance_intent_with_semantics(visual, &semantics("draw", &[], Specificity::High));
    assert!(!specific.capabilities.needs_optimization);
}

#[test]
fn test_many_entities_raise_trivial_complexity() {
    let enhanced = enhance_intent_with_semantics(
        intent(0.6),
        &semantics("review", &["Rust", "Go", "Zig"], Specificity::High),
    );
    assert_eq!(enhanced.complexity, Complexity::Moderate);
}

#[test]
fn test_degraded_default_survives_empty_semantics() {
    let enhanced = enhance_intent_with_semantics(Intent::trivial_default(), &Semantics::empty());
    assert_eq!(enhanced, Intent::trivial_default());
}
