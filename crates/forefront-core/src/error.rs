//! Error types for forefront-core
//!
//! Step-level failures never surface here: they are recorded on the
//! `StepResult` and the pipeline carries on. What remains are errors a
//! caller cannot recover from inside one `execute()` call.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// No role prompt is registered for a step purpose
    #[error("no role prompt registered for purpose '{0}'")]
    MissingRole(String),

    /// Invalid configuration
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Config field name
        field: String,
        /// Detailed message
        message: String,
    },

    /// Backend model error
    #[error("llm error: {0}")]
    Llm(#[from] forefront_llm::Error),

    /// Dispatch could not find a backend for a step
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// A backend call exceeded the per-step timeout
    #[error("step {step} timed out after {timeout_ms}ms")]
    StepTimeout {
        /// Step purpose
        step: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// The caller cancelled the request
    #[error("request cancelled")]
    Cancelled,

    /// Internal error (serialization, invariant breach)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error must escape `execute()` rather than being
    /// recorded against a single step.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::MissingRole(_) | Error::InvalidConfig { .. } | Error::Internal(_)
        )
    }

    /// Whether a retry of the same backend call may succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Llm(e) => e.is_transient(),
            Error::StepTimeout { .. } => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(format!("serialization: {e}"))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for user-facing error messages
///
/// Callers translate a fatal error into a generic failure for the end user;
/// the full error stays in logs.
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get a suggestion for how to fix the error
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::MissingRole(_) | Error::Internal(_) => {
                "Something went wrong while preparing your request.".to_string()
            }
            Error::InvalidConfig { field, .. } => {
                format!("The assistant is misconfigured ('{field}').")
            }
            Error::Llm(forefront_llm::Error::RateLimit) => {
                "The AI service is busy right now. Please try again in a moment.".to_string()
            }
            Error::Llm(forefront_llm::Error::NotConfigured(_)) => {
                "No AI model backend is configured.".to_string()
            }
            Error::Llm(_) | Error::Dispatch(_) => {
                "The AI service could not complete your request.".to_string()
            }
            Error::StepTimeout { .. } => "The AI service took too long to respond.".to_string(),
            Error::Cancelled => "The request was cancelled.".to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::InvalidConfig { field, .. } => Some(format!(
                "Check the '{field}' setting in config/default.toml or the FOREFRONT_ environment variables."
            )),
            Error::Llm(forefront_llm::Error::NotConfigured(_)) => {
                Some("Set OPENROUTER_API_KEY to enable the OpenRouter backend.".to_string())
            }
            Error::Llm(_) | Error::StepTimeout { .. } => {
                Some("Try again, or pick a different model.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error for display in the CLI
#[must_use]
pub fn format_error_for_cli(error: &Error) -> String {
    let mut output = error.user_message();
    if let Some(suggestion) = error.suggestion() {
        output.push_str("\n\n");
        output.push_str(&suggestion);
    }
    output.push_str(&format!("\n\n(details: {error})"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors() {
        assert!(Error::MissingRole("x".into()).is_fatal());
        assert!(Error::InvalidConfig {
            field: "quality_threshold".into(),
            message: "out of range".into()
        }
        .is_fatal());
        assert!(!Error::Llm(forefront_llm::Error::RateLimit).is_fatal());
        assert!(!Error::Cancelled.is_fatal());
    }

    #[test]
    fn test_transient_errors() {
        assert!(Error::Llm(forefront_llm::Error::Timeout(10)).is_transient());
        assert!(Error::StepTimeout {
            step: "research".into(),
            timeout_ms: 10
        }
        .is_transient());
        assert!(!Error::Llm(forefront_llm::Error::Api("bad".into())).is_transient());
        assert!(!Error::Dispatch("none".into()).is_transient());
    }

    #[test]
    fn test_user_message_hides_internals() {
        let err = Error::Internal("mutex poisoned at orchestrator/core.rs".into());
        assert!(!err.user_message().contains("mutex"));

        let err = Error::Llm(forefront_llm::Error::RateLimit);
        assert!(err.user_message().contains("busy"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_format_error_for_cli() {
        let err = Error::InvalidConfig {
            field: "step_timeout".into(),
            message: "must be positive".into(),
        };
        let formatted = format_error_for_cli(&err);
        assert!(formatted.contains("misconfigured"));
        assert!(formatted.contains("config/default.toml"));
        assert!(formatted.contains("must be positive"));
    }
}
