use std::time::Duration;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::debug;

use crate::constants::GEMINI_PROVIDER_ID;

use super::adapter::{Classification, ProviderAdapter};
use super::error::ProviderError;
use super::parse::parse_verdict;
use super::prompt::estimate_tokens;

/// Default free-tier model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Gemini through the `genai` client (reads `GEMINI_API_KEY`).
#[derive(Clone)]
pub struct GeminiAdapter {
    id: String,
    client: Client,
    model: String,
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter")
            .field("id", &self.id)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiAdapter {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            id: GEMINI_PROVIDER_ID.to_string(),
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    async fn classify(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Classification, ProviderError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt.to_string())]);

        let response = tokio::time::timeout(
            timeout,
            self.client.exec_chat(&self.model, request, None),
        )
        .await
        .map_err(|_| ProviderError::Timeout(timeout))?
        .map_err(|e| ProviderError::from_upstream_message(e.to_string()))?;

        let content = response.first_text().unwrap_or_default().trim().to_string();
        debug!(model = %self.model, len = content.len(), "gemini response received");

        if content.is_empty() {
            return Err(ProviderError::malformed("empty response text"));
        }

        let verdict = parse_verdict(&content)?;
        Ok(Classification {
            label: verdict.label,
            reasoning: verdict.reasoning,
            tokens_in: estimate_tokens(prompt),
            tokens_out: estimate_tokens(&content),
        })
    }
}
