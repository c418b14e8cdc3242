use forefront_llm::TaskType as LlmTask;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Purpose of a workflow step; selects the persona that serves it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepType {
    /// Gather facts, comparisons and sources
    Research,
    /// Turn the request into a sharper generation prompt
    PromptOptimization,
    /// Visual direction for an image, optionally rendered
    ImageGeneration,
    /// Source code
    CodeGeneration,
    /// Prose
    TextGeneration,
    /// Merge all prior outputs into the final answer
    FinalComposition,
}

impl StepType {
    /// All step types in registry order
    pub const ALL: [StepType; 6] = [
        StepType::Research,
        StepType::PromptOptimization,
        StepType::ImageGeneration,
        StepType::CodeGeneration,
        StepType::TextGeneration,
        StepType::FinalComposition,
    ];

    /// Wire label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Research => "research",
            StepType::PromptOptimization => "prompt-optimization",
            StepType::ImageGeneration => "image-generation",
            StepType::CodeGeneration => "code-generation",
            StepType::TextGeneration => "text-generation",
            StepType::FinalComposition => "final-composition",
        }
    }

    /// Resolve a purpose string, accepting common aliases
    #[must_use]
    pub fn from_purpose(purpose: &str) -> Option<Self> {
        let normalized = purpose.trim().to_ascii_lowercase().replace('_', "-");
        let step = match normalized.as_str() {
            "research" | "web-research" | "fact-finding" => StepType::Research,
            "prompt-optimization" | "prompt-optimisation" | "optimization" | "prompt-crafting" => {
                StepType::PromptOptimization
            }
            "image-generation" | "image" | "visual" | "art-direction" => StepType::ImageGeneration,
            "code-generation" | "code" | "coding" => StepType::CodeGeneration,
            "text-generation" | "text" | "writing" => StepType::TextGeneration,
            "final-composition" | "composition" | "compose" | "final" => {
                StepType::FinalComposition
            }
            _ => return None,
        };
        Some(step)
    }

    /// Whether this step produces a deliverable
    #[must_use]
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            StepType::ImageGeneration | StepType::CodeGeneration | StepType::TextGeneration
        )
    }

    /// Routing task used to pick a model tier and token budget
    #[must_use]
    pub fn llm_task(&self) -> LlmTask {
        match self {
            StepType::Research => LlmTask::Research,
            StepType::PromptOptimization => LlmTask::PromptCrafting,
            StepType::ImageGeneration => LlmTask::VisualDirection,
            StepType::CodeGeneration => LlmTask::CodeGeneration,
            StepType::TextGeneration => LlmTask::Writing,
            StepType::FinalComposition => LlmTask::Composition,
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
