//! Envelope - the per-step request sent to a backend
//!
//! An envelope is built as a typed value and rendered only at the edge:
//! [`Envelope::to_messages`] for backends that accept a system/user message
//! list, [`Envelope::to_flat_prompt`] for backends that need one string.
//! Both renderings embed every prior step's serialized output verbatim.

use crate::roles::{RoleOutput, RolePrompt, StepType};
use forefront_llm::{Message, MessageRole};
use serde::Serialize;
use serde_json::Value;


/// Output of an earlier step threaded into later envelopes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorStep {
    /// 1-based step ordinal
    pub step: usize,
    /// Step purpose
    pub purpose: StepType,
    /// Parsed output
    pub output: RoleOutput,
}

impl PriorStep {
    /// Serialized output as embedded in prompts
    #[must_use]
    pub fn serialized_output(&self) -> String {
        serde_json::to_string(&self.output).unwrap_or_else(|_| self.output.display_text())
    }
}

/// Everything one backend call needs
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Persona instructions
    pub system_prompt: String,
    /// Expected answer shape
    pub output_schema: Value,
    /// Recent conversation turns, oldest first
    pub history: Vec<Message>,
    /// Outputs of all earlier steps in order
    pub prior_steps: Vec<PriorStep>,
    /// The user's request for this call
    pub user_request: String,
    /// Extra step-specific instructions
    pub instructions: Option<String>,
}

impl Envelope {
    /// Start an envelope for a role
    #[must_use]
    pub fn for_role(role: &RolePrompt, user_request: impl Into<String>) -> Self {
        Self {
            system_prompt: role.system_prompt.to_string(),
            output_schema: role.output_schema.clone(),
            history: Vec::new(),
            prior_steps: Vec::new(),
            user_request: user_request.into(),
            instructions: None,
        }
    }

    /// Attach conversation history, keeping only the last `limit` turns
    #[must_use]
    pub fn with_history(mut self, history: Vec<Message>, limit: usize) -> Self {
        let skip = history.len().saturating_sub(limit);
        self.history = history.into_iter().skip(skip).collect();
        self
    }

    /// Attach prior step outputs
    #[must_use]
    pub fn with_prior_steps(mut self, prior_steps: Vec<PriorStep>) -> Self {
        self.prior_steps = prior_steps;
        self
    }

    /// Attach step instructions
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    fn system_section(&self) -> String {
        let schema = serde_json::to_string_pretty(&self.output_schema)
            .unwrap_or_else(|_| self.output_schema.to_string());
        format!(
            "{}\n\nRespond with JSON matching this schema:\n{schema}",
            self.system_prompt
        )
    }

    fn request_section(&self) -> String {
        let mut body = String::new();

        if !self.prior_steps.is_empty() {
            body.push_str("## Previous step outputs\n");
            for prior in &self.prior_steps {
                body.push_str(&format!(
                    "Step {} ({}):\n{}\n",
                    prior.step,
                    prior.purpose,
                    prior.serialized_output()
                ));
            }
            body.push('\n');
        }

        body.push_str("## User request\n");
        body.push_str(&self.user_request);

        if let Some(instructions) = &self.instructions {
            body.push_str("\n\n## Instructions\n");
            body.push_str(instructions);
        }
        body
    }

    /// Render as a structured message list
    #[must_use]
    pub fn to_messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::system(self.system_section()));
        messages.extend(
            self.history
                .iter()
                .filter(|m| m.role != MessageRole::System)
                .cloned(),
        );
        messages.push(Message::user(self.request_section()));
        messages
    }

    /// Render as one prompt string for backends without message roles
    #[must_use]
    pub fn to_flat_prompt(&self) -> String {
        let mut prompt = self.system_section();

        let turns: Vec<&Message> = self
            .history
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .collect();
        if !turns.is_empty() {
            prompt.push_str("\n\n## Conversation so far\n");
            for turn in turns {
                prompt.push_str(&format!("{}: {}\n", turn.role.as_str(), turn.content));
            }
        }

        prompt.push_str("\n\n");
        prompt.push_str(&self.request_section());
        prompt
    }
}
