//! Intent - classification of raw requests
//!
//! Maps a free-form request onto a structured [`Intent`]: domain, task type,
//! complexity, delivery format and capability flags.
//!
//! # Module Structure
//!
//! - `types`: Intent data model
//! - `heuristic`: Deterministic rule-based classifier (default)
//! - `llm`: Model-backed classifier with heuristic fallback

mod heuristic;
mod llm;
mod types;


pub use heuristic::HeuristicClassifier;
pub use llm::{LlmIntentClassifier, CLASSIFICATION_PROMPT};
pub use types::{
    Capabilities, ClassificationOutcome, Complexity, DeliveryFormat, Domain, Intent, TaskType,
};

/// Turns a raw query into an [`Intent`].
///
/// Implementations must never fail: unclassifiable input degrades to
/// [`Intent::trivial_default`].
#[async_trait::async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classifier name for logs
    fn name(&self) -> &str;

    /// Classify a query
    async fn classify(&self, query: &str) -> Intent;
}

#[async_trait::async_trait]
impl IntentClassifier for HeuristicClassifier {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn classify(&self, query: &str) -> Intent {
        HeuristicClassifier::classify(self, query)
    }
}

/// Classify with the default heuristic classifier
#[must_use]
pub fn classify(query: &str) -> Intent {
    HeuristicClassifier::new().classify(query)
}
