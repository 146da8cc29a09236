use std::time::Duration;

use async_trait::async_trait;

use crate::model::IntentLabel;

use super::adapter::{Classification, ProviderAdapter};
use super::error::ProviderError;
use super::prompt::estimate_tokens;

const BUYING_SIGNALS: &[&str] = &[
    "scaling",
    "growth",
    "growing",
    "evaluating",
    "looking for",
    "hiring",
    "budget",
    "automation",
    "automate",
    "expanding",
    "outreach",
    "pipeline",
];

/// Deterministic, network-free classifier used when the mock provider mode is on.
///
/// Counts buying-signal phrases in the prompt's `Bio:` line: two or more is
/// `High`, one is `Medium`, none is `Low`.
#[derive(Debug, Clone)]
pub struct OfflineProvider {
    id: String,
}

impl OfflineProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn classify_text(prompt: &str) -> (IntentLabel, usize) {
        let bio = prompt
            .lines()
            .find_map(|line| line.strip_prefix("Bio:"))
            .unwrap_or_default()
            .to_lowercase();
        let hits = BUYING_SIGNALS.iter().filter(|s| bio.contains(*s)).count();
        let label = match hits {
            0 => IntentLabel::Low,
            1 => IntentLabel::Medium,
            _ => IntentLabel::High,
        };
        (label, hits)
    }
}

#[async_trait]
impl ProviderAdapter for OfflineProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn classify(
        &self,
        prompt: &str,
        _timeout: Duration,
    ) -> Result<Classification, ProviderError> {
        let (label, hits) = Self::classify_text(prompt);
        let reasoning = format!("Offline classifier found {hits} buying signal(s) in the bio");
        Ok(Classification {
            label,
            tokens_in: estimate_tokens(prompt),
            tokens_out: estimate_tokens(&reasoning),
            reasoning,
        })
    }
}
