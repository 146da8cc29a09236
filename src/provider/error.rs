use std::time::Duration;

use thiserror::Error;

/// Transient failure of a single provider call.
///
/// Every variant is retryable; none of them reaches the caller of
/// [`HybridScorer::score_lead`](crate::scoring::HybridScorer::score_lead).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ProviderError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ProviderError::Malformed(reason.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        ProviderError::Transport(reason.into())
    }

    /// Classifies a raw upstream error message.
    ///
    /// Quota and HTTP 429 wording becomes [`ProviderError::RateLimited`];
    /// everything else is a transport failure.
    pub fn from_upstream_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("429")
            || lower.contains("rate limit")
            || lower.contains("resource_exhausted")
            || lower.contains("quota")
        {
            ProviderError::RateLimited(message)
        } else {
            ProviderError::Transport(message)
        }
    }
}
