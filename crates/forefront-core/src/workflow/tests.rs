use super::*;
use crate::intent::{
    classify, Capabilities, ClassificationOutcome, Complexity, DeliveryFormat, Domain, Intent,
    TaskType,
};
use crate::roles::StepType;
use crate::semantics::{analyze_semantics, Semantics, Specificity};

fn intent(delivery_format: DeliveryFormat, research: bool, consensus: bool, opt: bool) -> Intent {
    Intent {
        domain: Domain::Technical,
        task_type: TaskType::Generation,
        complexity: Complexity::Moderate,
        delivery_format,
        capabilities: Capabilities {
            needs_research: research,
            needs_multi_model_consensus: consensus,
            needs_optimization: opt,
        },
        confidence: 0.7,
        outcome: ClassificationOutcome::Classified,
    }
}

fn specific() -> Semantics {
    Semantics {
        specificity: Specificity::Medium,
        ..Semantics::empty()
    }
}

#[test]
fn test_trivial_default_is_single_text_step() {
    let workflow = build_dynamic_workflow(&Intent::trivial_default(), &Semantics::empty());
    assert_eq!(workflow.step_types(), vec![StepType::TextGeneration]);
    assert_eq!(workflow.workflow_type, WorkflowType::SingleStep);
    assert!(workflow.steps[0].required);
    assert!(!workflow.is_composed());
    assert_eq!(workflow.estimated_time_secs, 15);
}

#[test]
fn test_optimized_image_workflow() {
    let workflow = build_dynamic_workflow(
        &intent(DeliveryFormat::Visual, false, false, true),
        &specific(),
    );
    assert_eq!(
        workflow.step_types(),
        vec![
            StepType::PromptOptimization,
            StepType::ImageGeneration,
            StepType::FinalComposition,
        ]
    );
    assert_eq!(workflow.workflow_type, WorkflowType::OptimizeThenGenerate);
    assert!(workflow.steps[1].required);
    assert!(!workflow.steps[0].required);
    assert_eq!(workflow.estimated_time_secs, 8 + 30 + 12);
}

#[test]
fn test_research_and_visualization_scenario() {
    let query = "Research climate change data and create an infographic presentation";
    let workflow = build_dynamic_workflow(&classify(query), &analyze_semantics(query));

    assert_eq!(
        workflow.step_types(),
        vec![
            StepType::Research,
            StepType::PromptOptimization,
            StepType::TextGeneration,
            StepType::ImageGeneration,
            StepType::FinalComposition,
        ]
    );
    assert_eq!(workflow.workflow_type, WorkflowType::ConsensusChain);
    assert!(workflow.steps.last().unwrap().aggregate);
    assert!(workflow.steps.iter().all(|s| !s.required));
    assert_eq!(workflow.estimated_time_secs, 20 + 8 + 15 + 30 + 24);
}

#[test]
fn test_consensus_single_step_is_aggregated() {
    let workflow = build_dynamic_workflow(
        &intent(DeliveryFormat::Code, false, true, false),
        &specific(),
    );
    assert_eq!(workflow.step_types(), vec![StepType::CodeGeneration]);
    assert_eq!(workflow.workflow_type, WorkflowType::SingleStep);
    assert!(workflow.steps[0].aggregate);
    assert!(workflow.steps[0].required);
    assert_eq!(workflow.estimated_time_secs, 50);
}

#[test]
fn test_vague_visual_request_gets_optimization() {
    let vague = Semantics {
        specificity: Specificity::Low,
        ..Semantics::empty()
    };
    let workflow = build_dynamic_workflow(&intent(DeliveryFormat::Visual, false, false, false), &vague);
    assert_eq!(workflow.steps[0].step_type, StepType::PromptOptimization);

    let workflow = build_dynamic_workflow(&intent(DeliveryFormat::Text, false, false, false), &vague);
    assert_eq!(workflow.step_types(), vec![StepType::TextGeneration]);
}

#[test]
fn test_research_then_generate_shape() {
    let workflow = build_dynamic_workflow(
        &intent(DeliveryFormat::Text, true, false, false),
        &specific(),
    );
    assert_eq!(workflow.workflow_type, WorkflowType::ResearchThenGenerate);
    assert_eq!(workflow.position(StepType::Research), Some(0));
    assert!(workflow.is_composed());
}

#[test]
fn test_model_hints_are_attached() {
    let builder = WorkflowBuilder::new().with_model_hint(StepType::CodeGeneration, "code-large");
    let workflow = builder.build(&intent(DeliveryFormat::Code, true, false, false), &specific());

    for step in &workflow.steps {
        if step.step_type == StepType::CodeGeneration {
            assert_eq!(step.model_hint.as_deref(), Some("code-large"));
        } else {
            assert!(step.model_hint.is_none());
        }
    }
}

#[test]
fn test_capabilities_map_onto_steps_for_every_combination() {
    let deliveries = [
        DeliveryFormat::Text,
        DeliveryFormat::Visual,
        DeliveryFormat::Multimedia,
        DeliveryFormat::Code,
        DeliveryFormat::Interactive,
    ];

    for delivery in deliveries {
        for bits in 0..8u8 {
            let (research, consensus, opt) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let workflow = build_dynamic_workflow(&intent(delivery, research, consensus, opt), &specific());
            let types = workflow.step_types();
            let label = format!("{delivery} r={research} c={consensus} o={opt}");

            assert!(!types.is_empty(), "{label}");
            assert_eq!(types.contains(&StepType::Research), research, "{label}");

            let first_generation = types.iter().position(StepType::is_generation);
            assert!(first_generation.is_some(), "{label}");
            if opt {
                let optimization = workflow.position(StepType::PromptOptimization);
                assert!(optimization < first_generation, "{label}");
                assert!(optimization.is_some(), "{label}");
            }
            if types.len() > 1 {
                assert_eq!(types.last(), Some(&StepType::FinalComposition), "{label}");
            }
            assert_eq!(
                workflow.steps.last().map(|s| s.aggregate),
                Some(consensus),
                "{label}"
            );
        }
    }
}

#[test]
fn test_same_inputs_give_same_structure() {
    let query = "Create a tutorial teaching Python from the basics";
    let (intent, semantics) = (classify(query), analyze_semantics(query));

    let first = build_dynamic_workflow(&intent, &semantics);
    let second = build_dynamic_workflow(&intent, &semantics);
    assert_eq!(first.step_types(), second.step_types());
    assert_eq!(first.workflow_type, second.workflow_type);
    assert_ne!(first.workflow_id, second.workflow_id);
}

#[test]
fn test_workflow_serializes_camel_case() {
    let workflow = build_dynamic_workflow(
        &intent(DeliveryFormat::Visual, false, false, true),
        &specific(),
    );
    let json = serde_json::to_value(&workflow).unwrap();
    assert_eq!(json["workflowType"], "optimize-then-generate");
    assert_eq!(json["steps"][1]["stepType"], "image-generation");
    assert!(json["estimatedTimeSecs"].is_u64());
}
