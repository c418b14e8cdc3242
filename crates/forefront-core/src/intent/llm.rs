//! Model-backed intent classification with heuristic fallback

use super::heuristic::HeuristicClassifier;
use super::types::{
    Capabilities, ClassificationOutcome, Complexity, DeliveryFormat, Domain, Intent, TaskType,
};
use super::IntentClassifier;
use crate::roles::parse_json_object;
use forefront_llm::{LlmRouter, Message, TaskType as LlmTask};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed classification prompt; the model must answer with one JSON object.
pub const CLASSIFICATION_PROMPT: &str = r#"You classify user requests for an AI orchestration system.
Answer with ONE JSON object and nothing else:
{"domain": "creative|analytical|learning|technical|hybrid",
 "taskType": "generation|research|analysis|teaching|optimization",
 "complexity": "trivial|moderate|complex|expert",
 "deliveryFormat": "text|visual|multimedia|code|interactive",
 "capabilities": {"needsResearch": bool, "needsMultiModelConsensus": bool, "needsOptimization": bool},
 "confidence": 0.0-1.0}
Rules:
- "hybrid" when the request combines two or more domains (e.g. research + visualization).
- needsResearch when current/external information, comparisons or explicit research are involved.
- needsMultiModelConsensus for debugging, data analysis, architecture design and hybrid tasks.
- needsOptimization when a prompt or draft should be refined before final generation
  (image/video generation, tutorials, code optimization)."#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelAnswer {
    domain: Domain,
    task_type: TaskType,
    complexity: Complexity,
    delivery_format: DeliveryFormat,
    #[serde(default)]
    capabilities: Capabilities,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

fn default_confidence() -> f64 {
    0.7
}

/// Asks a low-temperature model for the intent and falls back to the
/// heuristic classifier on any failure. Never returns an error.
pub struct LlmIntentClassifier {
    router: Arc<LlmRouter>,
    fallback: HeuristicClassifier,
    timeout: Duration,
}

impl LlmIntentClassifier {
    /// Create a classifier backed by `router`
    #[must_use]
    pub fn new(router: Arc<LlmRouter>) -> Self {
        Self {
            router,
            fallback: HeuristicClassifier::new(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Set the classification call timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse a model answer into an intent
    pub(crate) fn parse_answer(raw: &str) -> Option<Intent> {
        let answer: ModelAnswer = parse_json_object(raw)?;
        Some(Intent {
            domain: answer.domain,
            task_type: answer.task_type,
            complexity: answer.complexity,
            delivery_format: answer.delivery_format,
            capabilities: answer.capabilities,
            confidence: answer.confidence.clamp(0.0, 1.0),
            outcome: ClassificationOutcome::Classified,
        })
    }
}

#[async_trait::async_trait]
impl IntentClassifier for LlmIntentClassifier {
    fn name(&self) -> &str {
        "llm"
    }

    async fn classify(&self, query: &str) -> Intent {
        if query.trim().is_empty() {
            return Intent::trivial_default();
        }

        let messages = vec![
            Message::system(CLASSIFICATION_PROMPT),
            Message::user(query.to_string()),
        ];

        let call = self
            .router
            .complete_for_task(LlmTask::Classification, messages);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => match Self::parse_answer(&response.content) {
                Some(intent) => {
                    debug!(model = %response.model, domain = %intent.domain, "Model classified intent");
                    intent
                }
                None => {
                    warn!("Unparseable classification answer, using heuristic");
                    self.fallback.classify(query)
                }
            },
            Ok(Err(e)) => {
                warn!(error = %e, "Classification call failed, using heuristic");
                self.fallback.classify(query)
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Classification call timed out, using heuristic"
                );
                self.fallback.classify(query)
            }
        }
    }
}
