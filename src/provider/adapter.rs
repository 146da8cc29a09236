use std::time::Duration;

use async_trait::async_trait;

use crate::model::IntentLabel;

use super::error::ProviderError;

/// A successful classification, with token counts for cost estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: IntentLabel,
    pub reasoning: String,
    pub tokens_in: u32,
    pub tokens_out: u32,
}

#[async_trait]
/// One external intent-classification endpoint.
pub trait ProviderAdapter: Send + Sync {
    /// Stable identifier used in configuration, attempt logs and usage stats.
    fn id(&self) -> &str;

    /// Classifies `prompt` once. `timeout` bounds the underlying request.
    async fn classify(&self, prompt: &str, timeout: Duration)
    -> Result<Classification, ProviderError>;
}
