//! Message types for LLM conversations
//!
//! This module defines the core message types used in LLM conversations.

use serde::{Deserialize, Serialize};

/// Role in a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (instructions)
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl MessageRole {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Parse a caller-supplied role label.
    ///
    /// Unknown labels are treated as user turns.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "system" => Self::System,
            "assistant" | "model" | "ai" => Self::Assistant,
            _ => Self::User,
        }
    }
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let system = Message::system("You are a research analyst");
        assert_eq!(system.role, MessageRole::System);

        let user = Message::user("Compare React and Vue");
        assert_eq!(user.role, MessageRole::User);

        let assistant = Message::assistant("{}");
        assert_eq!(assistant.role, MessageRole::Assistant);
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(MessageRole::from_label("assistant"), MessageRole::Assistant);
        assert_eq!(MessageRole::from_label(" System "), MessageRole::System);
        assert_eq!(MessageRole::from_label("model"), MessageRole::Assistant);
        assert_eq!(MessageRole::from_label("human"), MessageRole::User);
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
