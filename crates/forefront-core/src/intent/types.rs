//! Intent data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro category of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Stories, images, art, media
    Creative,
    /// Research, comparison, data analysis
    Analytical,
    /// Explanations, tutorials, teaching
    Learning,
    /// Code, systems, debugging
    Technical,
    /// Two or more of the above in one request
    Hybrid,
}

/// Verb-level action the request needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Produce new content
    Generation,
    /// Gather and compare information
    Research,
    /// Inspect, debug or evaluate something
    Analysis,
    /// Explain or teach
    Teaching,
    /// Improve something that exists
    Optimization,
}

/// How much work the request warrants, ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// One narrow action
    Trivial,
    /// A single well-scoped task
    Moderate,
    /// Several chained sub-tasks or broad scope
    Complex,
    /// Expert-level technical asks
    Expert,
}

/// Expected output medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryFormat {
    /// Prose
    Text,
    /// A still image
    Visual,
    /// Text plus visuals (presentations, infographics, video)
    Multimedia,
    /// Source code
    Code,
    /// Quizzes, exercises, simulations
    Interactive,
}

macro_rules! impl_label {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Wire label of this value
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_label!(Domain {
    Creative => "creative",
    Analytical => "analytical",
    Learning => "learning",
    Technical => "technical",
    Hybrid => "hybrid",
});

impl_label!(TaskType {
    Generation => "generation",
    Research => "research",
    Analysis => "analysis",
    Teaching => "teaching",
    Optimization => "optimization",
});

impl_label!(Complexity {
    Trivial => "trivial",
    Moderate => "moderate",
    Complex => "complex",
    Expert => "expert",
});

impl_label!(DeliveryFormat {
    Text => "text",
    Visual => "visual",
    Multimedia => "multimedia",
    Code => "code",
    Interactive => "interactive",
});

/// Capabilities a request needs beyond a single generation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Needs external/current information or comparison
    pub needs_research: bool,
    /// Benefits from cross-checking across models
    pub needs_multi_model_consensus: bool,
    /// Needs a refinement/prompt-crafting step before generation
    pub needs_optimization: bool,
}

/// Whether the classifier reached a real decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationOutcome {
    /// Normal classification
    #[default]
    Classified,
    /// Input could not be categorized; the trivial default was used
    Degraded,
}

/// Structured classification of a user request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Macro category
    pub domain: Domain,
    /// Verb-level action
    pub task_type: TaskType,
    /// Amount of work warranted
    pub complexity: Complexity,
    /// Expected output medium
    pub delivery_format: DeliveryFormat,
    /// Capability flags
    pub capabilities: Capabilities,
    /// Classifier certainty in `[0, 1]`, diagnostics only
    pub confidence: f64,
    /// Degradation marker
    #[serde(default)]
    pub outcome: ClassificationOutcome,
}

impl Intent {
    /// The safe, cheap default used for empty or unclassifiable input
    #[must_use]
    pub fn trivial_default() -> Self {
        Self {
            domain: Domain::Technical,
            task_type: TaskType::Analysis,
            complexity: Complexity::Trivial,
            delivery_format: DeliveryFormat::Text,
            capabilities: Capabilities::default(),
            confidence: 0.0,
            outcome: ClassificationOutcome::Degraded,
        }
    }

    /// Whether this intent came from the degraded fallback
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.outcome == ClassificationOutcome::Degraded
    }
}
