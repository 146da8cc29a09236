use std::time::Duration;

use async_openai::types::chat::CreateChatCompletionResponse;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::debug;

use crate::constants::OPENAI_PROVIDER_ID;

use super::adapter::{Classification, ProviderAdapter};
use super::error::ProviderError;
use super::parse::parse_verdict;
use super::prompt::{estimate_tokens, truncate_chars};

/// Default paid fallback model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 200;
const ERROR_BODY_CHARS: usize = 200;

/// OpenAI chat-completions over HTTP, decoded with `async-openai` types.
#[derive(Clone)]
pub struct OpenAiAdapter {
    id: String,
    http: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiAdapter {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            id: OPENAI_PROVIDER_ID.to_string(),
            http: HttpClient::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    async fn classify(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Classification, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::transport(format!(
                "HTTP {status}: {}",
                truncate_chars(&text, ERROR_BODY_CHARS)
            )));
        }

        let completion: CreateChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(timeout)
            } else {
                ProviderError::malformed(format!("unexpected completion shape: {e}"))
            }
        })?;

        classification_from_completion(&completion, prompt)
    }
}

/// Extracts a validated classification from a decoded completion.
///
/// Token counts come from the completion's `usage` block when present and are
/// estimated from text length otherwise.
pub fn classification_from_completion(
    completion: &CreateChatCompletionResponse,
    prompt: &str,
) -> Result<Classification, ProviderError> {
    let content = completion
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ProviderError::malformed("completion has no message content"))?;

    debug!(model = %completion.model, len = content.len(), "openai response received");

    let verdict = parse_verdict(content)?;
    let (tokens_in, tokens_out) = completion
        .usage
        .as_ref()
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or_else(|| (estimate_tokens(prompt), estimate_tokens(content)));

    Ok(Classification {
        label: verdict.label,
        reasoning: verdict.reasoning,
        tokens_in,
        tokens_out,
    })
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout)
    } else if err.status() == Some(StatusCode::TOO_MANY_REQUESTS) {
        ProviderError::RateLimited(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}
