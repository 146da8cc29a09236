use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::types::{AttemptOutcome, Pricing, ProviderAttempt, UsageSummary};

/// Append-only log of provider attempts.
///
/// Safe to share between concurrently scored leads; recording never fails.
#[derive(Debug, Default)]
pub struct UsageTracker {
    attempts: RwLock<Vec<ProviderAttempt>>,
    exhaustions: RwLock<Vec<DateTime<Utc>>>,
    pricing: HashMap<String, Pricing>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker that prices tokens per provider. Unknown providers are free.
    pub fn with_pricing(pricing: HashMap<String, Pricing>) -> Self {
        Self {
            pricing,
            ..Self::default()
        }
    }

    pub fn estimate_cost(&self, provider_id: &str, tokens_in: u32, tokens_out: u32) -> f64 {
        self.pricing
            .get(provider_id)
            .map(|p| p.estimate(tokens_in, tokens_out))
            .unwrap_or(0.0)
    }

    pub fn record(&self, attempt: ProviderAttempt) {
        tracing::trace!(
            provider = %attempt.provider_id,
            attempt = attempt.attempt,
            outcome = ?attempt.outcome,
            "recorded provider attempt"
        );
        self.attempts.write().push(attempt);
    }

    /// Notes a lead whose providers were all exhausted.
    pub fn record_exhaustion(&self, at: DateTime<Utc>) {
        self.exhaustions.write().push(at);
    }

    pub fn attempts(&self) -> Vec<ProviderAttempt> {
        self.attempts.read().clone()
    }

    pub fn len(&self) -> usize {
        self.attempts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.read().is_empty()
    }

    pub fn reset(&self) {
        self.attempts.write().clear();
        self.exhaustions.write().clear();
    }

    /// Aggregates attempts started at or after `since` (all of them for `None`).
    pub fn summarize(&self, since: Option<DateTime<Utc>>) -> UsageSummary {
        let in_window = |at: &DateTime<Utc>| since.is_none_or(|s| *at >= s);

        let mut summary = UsageSummary {
            since,
            ..UsageSummary::default()
        };
        let mut latency_totals: HashMap<String, f64> = HashMap::new();

        for attempt in self.attempts.read().iter().filter(|a| in_window(&a.started_at)) {
            let usage = summary
                .providers
                .entry(attempt.provider_id.clone())
                .or_default();
            usage.calls += 1;
            match attempt.outcome {
                AttemptOutcome::Success => usage.success += 1,
                AttemptOutcome::Timeout => usage.timeout += 1,
                AttemptOutcome::RateLimited => usage.rate_limited += 1,
                AttemptOutcome::Error => usage.error += 1,
            }
            usage.tokens += u64::from(attempt.tokens);
            usage.estimated_cost += attempt.cost_estimate;
            *latency_totals
                .entry(attempt.provider_id.clone())
                .or_default() += attempt.duration.as_secs_f64() * 1000.0;
        }

        for (id, usage) in summary.providers.iter_mut() {
            if usage.calls > 0 {
                let total = latency_totals.get(id).copied().unwrap_or(0.0);
                usage.avg_latency_ms = total / usage.calls as f64;
            }
            summary.total_calls += usage.calls;
            summary.total_estimated_cost += usage.estimated_cost;
        }

        if summary.total_calls > 0 {
            summary.cost_per_call = summary.total_estimated_cost / summary.total_calls as f64;
        }
        summary.exhausted_leads = self
            .exhaustions
            .read()
            .iter()
            .filter(|at| in_window(at))
            .count() as u64;
        summary.recommended_primary = recommend_primary(&summary);

        summary
    }
}

fn recommend_primary(summary: &UsageSummary) -> Option<String> {
    summary
        .providers
        .iter()
        .filter(|(_, usage)| usage.calls > 0)
        .max_by(|(_, a), (_, b)| {
            a.success_rate()
                .total_cmp(&b.success_rate())
                .then_with(|| b.cost_per_call().total_cmp(&a.cost_per_call()))
        })
        .map(|(id, _)| id.clone())
}
