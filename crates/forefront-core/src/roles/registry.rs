use super::step_type::StepType;
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::sync::LazyLock;

/// A fixed persona serving one step purpose
#[derive(Debug, Clone)]
pub struct RolePrompt {
    /// Persona name
    pub name: &'static str,
    /// Step purpose this persona serves
    pub step_type: StepType,
    /// System prompt sent with every call
    pub system_prompt: &'static str,
    /// Expected shape of the JSON answer
    pub output_schema: Value,
}

const RESEARCH_ANALYST: &str = "You are a meticulous Research Analyst. \
Gather the facts, comparisons and current information the request depends on. \
Prefer primary sources, separate established facts from opinion, and flag uncertainty. \
Report a confidence between 0 and 1 that reflects how well the evidence covers the request. \
Answer with a single JSON object matching the output schema and nothing else.";

const PROMPT_ENGINEER: &str = "You are an expert Prompt Engineer. \
Rewrite the user's request into one precise prompt for the generation step that follows. \
Keep every constraint the user stated, fold in relevant research findings, \
and make subject, style and format explicit. \
Answer with a single JSON object matching the output schema and nothing else.";

const ART_DIRECTOR: &str = "You are a seasoned Art Director. \
Turn the request and any optimized prompt into concrete visual direction: \
a detailed image prompt, a named style, an aspect ratio (1:1, 16:9 or 9:16) and a color palette. \
Describe composition when the layout matters. \
Answer with a single JSON object matching the output schema and nothing else.";

const SOFTWARE_ENGINEER: &str = "You are a senior Software Engineer. \
Write correct, idiomatic, production-ready code for the request. \
Handle errors explicitly, avoid placeholder logic, and keep the explanation short. \
Answer with a single JSON object matching the output schema and nothing else.";

const TECHNICAL_WRITER: &str = "You are a clear and engaging Technical Writer. \
Write the requested text for the intended audience, structured with short sections where helpful. \
Use research findings when they are provided and never invent sources. \
Answer with a single JSON object matching the output schema and nothing else.";

const FINAL_COMPOSER: &str = "You are the Final Composer. \
Merge the outputs of all previous steps into one coherent answer to the user's original request. \
Resolve contradictions, keep citations, and do not mention the internal steps. \
Rate the quality of your answer between 0 and 1 in qualityScore, honestly. \
Answer with a single JSON object matching the output schema and nothing else.";

static REGISTRY: LazyLock<Vec<RolePrompt>> = LazyLock::new(|| {
    vec![
        RolePrompt {
            name: "Research Analyst",
            step_type: StepType::Research,
            system_prompt: RESEARCH_ANALYST,
            output_schema: json!({
                "summary": "string",
                "keyFindings": ["string"],
                "citations": [{ "title": "string", "url": "string?" }],
                "confidence": "number 0-1"
            }),
        },
        RolePrompt {
            name: "Prompt Engineer",
            step_type: StepType::PromptOptimization,
            system_prompt: PROMPT_ENGINEER,
            output_schema: json!({
                "optimizedPrompt": "string",
                "negativePrompt": "string?",
                "rationale": "string?"
            }),
        },
        RolePrompt {
            name: "Art Director",
            step_type: StepType::ImageGeneration,
            system_prompt: ART_DIRECTOR,
            output_schema: json!({
                "imagePrompt": "string",
                "style": "string",
                "aspectRatio": "1:1 | 16:9 | 9:16",
                "colorPalette": ["string"],
                "composition": "string?"
            }),
        },
        RolePrompt {
            name: "Software Engineer",
            step_type: StepType::CodeGeneration,
            system_prompt: SOFTWARE_ENGINEER,
            output_schema: json!({
                "language": "string",
                "code": "string",
                "explanation": "string"
            }),
        },
        RolePrompt {
            name: "Technical Writer",
            step_type: StepType::TextGeneration,
            system_prompt: TECHNICAL_WRITER,
            output_schema: json!({
                "title": "string?",
                "content": "string"
            }),
        },
        RolePrompt {
            name: "Final Composer",
            step_type: StepType::FinalComposition,
            system_prompt: FINAL_COMPOSER,
            output_schema: json!({
                "response": "string",
                "qualityScore": "number 0-1",
                "summary": "string?"
            }),
        },
    ]
});

/// Every registered persona, in step order
#[must_use]
pub fn all_roles() -> &'static [RolePrompt] {
    &REGISTRY
}

/// Persona for a step type
///
/// # Errors
///
/// Returns [`Error::MissingRole`] if no persona serves `step_type`.
pub fn role_for(step_type: StepType) -> Result<&'static RolePrompt> {
    REGISTRY
        .iter()
        .find(|role| role.step_type == step_type)
        .ok_or_else(|| Error::MissingRole(step_type.to_string()))
}

/// Persona for a purpose string such as `"prompt-optimization"`
#[must_use]
pub fn get_system_prompt_for_purpose(purpose: &str) -> Option<&'static RolePrompt> {
    let step_type = StepType::from_purpose(purpose)?;
    role_for(step_type).ok()
}
