//! Typed role outputs
//!
//! Model answers are parsed into the variant expected for the step. A missing
//! object, a serde mismatch or an empty required field yields
//! [`RoleOutput::Degraded`] holding the raw text.

use super::json::parse_json_object;
use super::step_type::StepType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A source cited by the research role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Source title
    pub title: String,
    /// Source location, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Research Analyst output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchOutput {
    /// Condensed findings
    pub summary: String,
    /// Individual facts worth carrying forward
    #[serde(default)]
    pub key_findings: Vec<String>,
    /// Sources
    #[serde(default)]
    pub citations: Vec<Citation>,
    /// Self-assessed confidence in `[0, 1]`
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl ResearchOutput {
    /// Research output carrying nothing, used when research fails
    #[must_use]
    pub fn empty() -> Self {
        Self {
            summary: String::new(),
            key_findings: Vec::new(),
            citations: Vec::new(),
            confidence: 0.0,
        }
    }
}

/// Prompt Engineer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOutput {
    /// Prompt to hand to the generation step
    pub optimized_prompt: String,
    /// Things the generator should avoid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Why the prompt was changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Art Director output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualDirectionOutput {
    /// Prompt for the image renderer
    pub image_prompt: String,
    /// Visual style
    #[serde(default)]
    pub style: String,
    /// Aspect ratio such as `16:9`
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    /// Dominant colors
    #[serde(default)]
    pub color_palette: Vec<String>,
    /// Layout notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
}

/// Software Engineer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeOutput {
    /// Language tag for the code block
    #[serde(default = "default_language")]
    pub language: String,
    /// The source code
    pub code: String,
    /// Short walkthrough
    #[serde(default)]
    pub explanation: String,
}

/// Technical Writer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOutput {
    /// Optional heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text
    pub content: String,
}

/// Final Composer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedOutput {
    /// Answer shown to the user
    pub response: String,
    /// Self-assessed quality in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    /// One-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Parsed output of one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleOutput {
    /// Research findings
    Research(ResearchOutput),
    /// Optimized prompt
    Prompt(PromptOutput),
    /// Visual direction
    VisualDirection(VisualDirectionOutput),
    /// Code
    Code(CodeOutput),
    /// Prose
    Text(TextOutput),
    /// Final composed answer
    Composed(ComposedOutput),
    /// Model text that did not match the role's schema
    Degraded {
        /// Raw model text
        raw: String,
    },
}

fn default_confidence() -> f64 {
    0.5
}

fn default_aspect_ratio() -> String {
    "1:1".to_string()
}

fn default_language() -> String {
    "text".to_string()
}

fn parse_object<T: DeserializeOwned>(raw: &str) -> Option<T> {
    parse_json_object(raw)
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl RoleOutput {
    /// Parse a model answer into the variant expected for `step_type`
    #[must_use]
    pub fn parse(step_type: StepType, raw: &str) -> Self {
        let parsed = match step_type {
            StepType::Research => parse_object::<ResearchOutput>(raw)
                .filter(|o| filled(&o.summary))
                .map(|mut o| {
                    o.confidence = o.confidence.clamp(0.0, 1.0);
                    RoleOutput::Research(o)
                }),
            StepType::PromptOptimization => parse_object::<PromptOutput>(raw)
                .filter(|o| filled(&o.optimized_prompt))
                .map(RoleOutput::Prompt),
            StepType::ImageGeneration => parse_object::<VisualDirectionOutput>(raw)
                .filter(|o| filled(&o.image_prompt))
                .map(RoleOutput::VisualDirection),
            StepType::CodeGeneration => parse_object::<CodeOutput>(raw)
                .filter(|o| filled(&o.code))
                .map(RoleOutput::Code),
            StepType::TextGeneration => parse_object::<TextOutput>(raw)
                .filter(|o| filled(&o.content))
                .map(RoleOutput::Text),
            StepType::FinalComposition => parse_object::<ComposedOutput>(raw)
                .filter(|o| filled(&o.response))
                .map(|mut o| {
                    o.quality_score = o.quality_score.map(|q| q.clamp(0.0, 1.0));
                    RoleOutput::Composed(o)
                }),
        };

        parsed.unwrap_or_else(|| RoleOutput::Degraded {
            raw: raw.trim().to_string(),
        })
    }

    /// Whether the answer failed schema validation
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, RoleOutput::Degraded { .. })
    }

    /// Whether the output carries anything a later step or the user can use.
    ///
    /// Degraded text that is empty after trimming is not usable.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        match self {
            RoleOutput::Degraded { raw } => filled(raw),
            _ => true,
        }
    }

    /// Self-reported quality or confidence, where the role provides one
    #[must_use]
    pub fn self_score(&self) -> Option<f64> {
        match self {
            RoleOutput::Research(o) => Some(o.confidence),
            RoleOutput::Composed(o) => o.quality_score,
            _ => None,
        }
    }

    /// Citations carried by a research output
    #[must_use]
    pub fn citations(&self) -> &[Citation] {
        match self {
            RoleOutput::Research(o) => &o.citations,
            _ => &[],
        }
    }

    /// Text a user would read for this output
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            RoleOutput::Research(o) => {
                let mut text = o.summary.clone();
                for finding in &o.key_findings {
                    text.push_str("\n- ");
                    text.push_str(finding);
                }
                text
            }
            RoleOutput::Prompt(o) => o.optimized_prompt.clone(),
            RoleOutput::VisualDirection(o) if o.style.is_empty() => o.image_prompt.clone(),
            RoleOutput::VisualDirection(o) => format!("{} (style: {})", o.image_prompt, o.style),
            RoleOutput::Code(o) if o.explanation.is_empty() => {
                format!("```{}\n{}\n```", o.language, o.code)
            }
            RoleOutput::Code(o) => {
                format!("```{}\n{}\n```\n\n{}", o.language, o.code, o.explanation)
            }
            RoleOutput::Text(TextOutput {
                title: Some(title),
                content,
            }) => format!("# {title}\n\n{content}"),
            RoleOutput::Text(o) => o.content.clone(),
            RoleOutput::Composed(o) => o.response.clone(),
            RoleOutput::Degraded { raw } => raw.clone(),
        }
    }
}
