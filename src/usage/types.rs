use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::provider::ProviderError;

/// How a single provider attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    Timeout,
    RateLimited,
    Error,
}

impl From<&ProviderError> for AttemptOutcome {
    fn from(error: &ProviderError) -> Self {
        match error {
            ProviderError::Timeout(_) => AttemptOutcome::Timeout,
            ProviderError::RateLimited(_) => AttemptOutcome::RateLimited,
            ProviderError::Malformed(_) | ProviderError::Transport(_) => AttemptOutcome::Error,
        }
    }
}

/// One provider call made while scoring a lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderAttempt {
    pub provider_id: String,
    /// One-based attempt number within this provider.
    pub attempt: u32,
    pub started_at: DateTime<Utc>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub outcome: AttemptOutcome,
    /// Estimated USD cost. Failed attempts are free.
    pub cost_estimate: f64,
    /// Prompt plus completion tokens, `0` for failures.
    pub tokens: u32,
    /// Error text for failed attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Pricing {
    pub const FREE: Pricing = Pricing {
        input_per_million: 0.0,
        output_per_million: 0.0,
    };

    pub const fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    pub fn estimate(&self, tokens_in: u32, tokens_out: u32) -> f64 {
        (f64::from(tokens_in) * self.input_per_million
            + f64::from(tokens_out) * self.output_per_million)
            / 1_000_000.0
    }
}

/// Aggregated counters for one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderUsage {
    pub calls: u64,
    pub success: u64,
    pub timeout: u64,
    pub rate_limited: u64,
    pub error: u64,
    pub tokens: u64,
    pub estimated_cost: f64,
    pub avg_latency_ms: f64,
}

impl ProviderUsage {
    /// Fraction of calls that succeeded, `0.0` when there were none.
    pub fn success_rate(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.success as f64 / self.calls as f64
        }
    }

    pub fn cost_per_call(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.estimated_cost / self.calls as f64
        }
    }
}

/// Usage aggregated over a time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageSummary {
    /// Lower bound of the window, `None` for all recorded history.
    pub since: Option<DateTime<Utc>>,
    pub providers: BTreeMap<String, ProviderUsage>,
    pub total_calls: u64,
    pub total_estimated_cost: f64,
    /// Leads for which every provider was exhausted.
    pub exhausted_leads: u64,
    pub cost_per_call: f64,
    /// Provider with the best success rate (cheaper wins ties).
    pub recommended_primary: Option<String>,
}
