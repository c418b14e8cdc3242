//! Semantics - shallow linguistic features of a request
//!
//! Pure, synchronous, lexical extraction that runs independently of the
//! intent classifier. [`enhance_intent_with_semantics`] merges the two.
//!
//! # Module Structure
//!
//! - `analyzer`: action, subject, entity and specificity extraction
//! - `enhance`: intent refinement from semantic features

mod analyzer;
mod enhance;

#[cfg(test)]
mod tests;

pub use analyzer::analyze_semantics;
pub use enhance::{enhance_intent_with_semantics, HIGH_CONFIDENCE};

use serde::{Deserialize, Serialize};

/// How concretely a request is scoped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specificity {
    /// Vague or very short
    Low,
    /// Some concrete detail
    Medium,
    /// Named entities, numbers, quoted constraints
    High,
}

/// Feature set extracted from a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semantics {
    /// Dominant verb, lowercased base form
    pub primary_action: String,
    /// Dominant noun phrase acted upon
    pub primary_subject: String,
    /// Named entities in order of first appearance
    pub entities: Vec<String>,
    /// Scope concreteness
    pub specificity: Specificity,
}

impl Semantics {
    /// Semantics of an empty query
    #[must_use]
    pub fn empty() -> Self {
        Self {
            primary_action: String::new(),
            primary_subject: String::new(),
            entities: Vec::new(),
            specificity: Specificity::Low,
        }
    }
}
