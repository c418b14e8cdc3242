//! Error types for forefront-llm

use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider not configured
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// API error (4xx other than rate limiting)
    #[error("api error: {0}")]
    Api(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimit,

    /// Backend returned a 5xx status
    #[error("server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Sanitized error message
        message: String,
    },

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Timeout
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Provider-side failure that fits no other variant
    #[error("provider error: {0}")]
    Provider(String),
}

impl Error {
    /// Whether a retry of the same call may succeed.
    ///
    /// Rate limits, 5xx responses, network failures and timeouts are transient.
    /// Everything else (bad key, malformed request, unparseable body) is not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::ServerError { .. } | Self::Network(_) | Self::Timeout(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(Error::RateLimit.is_transient());
        assert!(Error::Timeout(1000).is_transient());
        assert!(Error::Network("reset".into()).is_transient());
        assert!(Error::ServerError {
            status: 503,
            message: "unavailable".into()
        }
        .is_transient());

        assert!(!Error::Api("bad request".into()).is_transient());
        assert!(!Error::NotConfigured("openrouter".into()).is_transient());
        assert!(!Error::InvalidResponse("no choices".into()).is_transient());
    }

    #[test]
    fn test_display() {
        let err = Error::ServerError {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "server error (502): bad gateway");
        assert_eq!(Error::Timeout(250).to_string(), "timeout after 250ms");
    }
}
