use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};

use super::*;
use crate::provider::ProviderError;

fn attempt(provider: &str, outcome: AttemptOutcome, cost: f64, ms: u64) -> ProviderAttempt {
    ProviderAttempt {
        provider_id: provider.to_string(),
        attempt: 1,
        started_at: Utc::now(),
        duration: Duration::from_millis(ms),
        outcome,
        cost_estimate: cost,
        tokens: if outcome == AttemptOutcome::Success { 120 } else { 0 },
        detail: None,
    }
}

#[test]
fn outcome_from_provider_error() {
    assert_eq!(
        AttemptOutcome::from(&ProviderError::Timeout(Duration::from_secs(1))),
        AttemptOutcome::Timeout
    );
    assert_eq!(
        AttemptOutcome::from(&ProviderError::RateLimited("429".into())),
        AttemptOutcome::RateLimited
    );
    assert_eq!(
        AttemptOutcome::from(&ProviderError::malformed("bad")),
        AttemptOutcome::Error
    );
    assert_eq!(
        AttemptOutcome::from(&ProviderError::transport("reset")),
        AttemptOutcome::Error
    );
}

#[test]
fn pricing_estimate_per_million() {
    let pricing = Pricing::new(0.15, 0.60);
    let cost = pricing.estimate(1_000_000, 1_000_000);
    assert!((cost - 0.75).abs() < 1e-9);
    assert_eq!(Pricing::FREE.estimate(5_000, 5_000), 0.0);
}

#[test]
fn estimate_cost_uses_provider_pricing() {
    let tracker = UsageTracker::with_pricing(HashMap::from([(
        "openai".to_string(),
        Pricing::new(1.0, 2.0),
    )]));
    assert!((tracker.estimate_cost("openai", 500_000, 250_000) - 1.0).abs() < 1e-9);
    assert_eq!(tracker.estimate_cost("gemini", 500_000, 250_000), 0.0);
}

#[test]
fn empty_tracker_summary() {
    let tracker = UsageTracker::new();
    let summary = tracker.summarize(None);

    assert!(tracker.is_empty());
    assert_eq!(summary.total_calls, 0);
    assert_eq!(summary.cost_per_call, 0.0);
    assert!(summary.providers.is_empty());
    assert!(summary.recommended_primary.is_none());
}

#[test]
fn summarize_counts_every_outcome() {
    let tracker = UsageTracker::new();
    tracker.record(attempt("gemini", AttemptOutcome::Timeout, 0.0, 100));
    tracker.record(attempt("gemini", AttemptOutcome::RateLimited, 0.0, 20));
    tracker.record(attempt("gemini", AttemptOutcome::Error, 0.0, 30));
    tracker.record(attempt("openai", AttemptOutcome::Success, 0.002, 50));
    tracker.record(attempt("openai", AttemptOutcome::Success, 0.002, 150));

    let summary = tracker.summarize(None);
    assert_eq!(tracker.len(), 5);
    assert_eq!(summary.total_calls, 5);

    let gemini = &summary.providers["gemini"];
    assert_eq!(gemini.calls, 3);
    assert_eq!(gemini.timeout, 1);
    assert_eq!(gemini.rate_limited, 1);
    assert_eq!(gemini.error, 1);
    assert_eq!(gemini.success, 0);
    assert_eq!(gemini.tokens, 0);

    let openai = &summary.providers["openai"];
    assert_eq!(openai.success, 2);
    assert_eq!(openai.tokens, 240);
    assert!((openai.avg_latency_ms - 100.0).abs() < 1e-6);
    assert!((summary.total_estimated_cost - 0.004).abs() < 1e-12);
    assert!((summary.cost_per_call - 0.0008).abs() < 1e-12);
    assert_eq!(summary.recommended_primary.as_deref(), Some("openai"));
}

#[test]
fn recommended_primary_prefers_cheaper_on_equal_success() {
    let tracker = UsageTracker::new();
    tracker.record(attempt("gemini", AttemptOutcome::Success, 0.0, 10));
    tracker.record(attempt("openai", AttemptOutcome::Success, 0.01, 10));

    let summary = tracker.summarize(None);
    assert_eq!(summary.recommended_primary.as_deref(), Some("gemini"));
}

#[test]
fn summarize_respects_since_window() {
    let tracker = UsageTracker::new();
    let mut old = attempt("gemini", AttemptOutcome::Success, 0.0, 10);
    old.started_at = Utc::now() - TimeDelta::hours(2);
    tracker.record(old);
    tracker.record(attempt("openai", AttemptOutcome::Success, 0.001, 10));
    tracker.record_exhaustion(Utc::now() - TimeDelta::hours(3));
    tracker.record_exhaustion(Utc::now());

    let since = Utc::now() - TimeDelta::hours(1);
    let recent = tracker.summarize(Some(since));
    assert_eq!(recent.since, Some(since));
    assert_eq!(recent.total_calls, 1);
    assert!(!recent.providers.contains_key("gemini"));
    assert_eq!(recent.exhausted_leads, 1);

    let all = tracker.summarize(None);
    assert_eq!(all.total_calls, 2);
    assert_eq!(all.exhausted_leads, 2);
}

#[test]
fn reset_clears_history() {
    let tracker = UsageTracker::new();
    tracker.record(attempt("gemini", AttemptOutcome::Success, 0.0, 10));
    tracker.record_exhaustion(Utc::now());
    tracker.reset();

    assert!(tracker.attempts().is_empty());
    assert_eq!(tracker.summarize(None).exhausted_leads, 0);
}

#[test]
fn attempt_serializes_duration_in_millis() {
    let mut record = attempt("openai", AttemptOutcome::Timeout, 0.0, 1500);
    record.detail = Some("request timed out".to_string());
    let json = serde_json::to_value(&record).expect("serialize");

    assert_eq!(json["duration_ms"], 1500);
    assert_eq!(json["outcome"], "timeout");
    assert_eq!(json["detail"], "request timed out");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_lose_no_attempts() {
    const WRITERS: usize = 8;
    const PER_WRITER: usize = 250;

    let tracker = Arc::new(UsageTracker::new());
    let writers: Vec<_> = (0..WRITERS)
        .map(|n| {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move {
                let provider = if n % 2 == 0 { "gemini" } else { "openai" };
                for i in 0..PER_WRITER {
                    let outcome = if i % 5 == 0 {
                        AttemptOutcome::Timeout
                    } else {
                        AttemptOutcome::Success
                    };
                    tracker.record(attempt(provider, outcome, 0.0, 1));
                    if i % 50 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        })
        .collect();

    let reader = {
        let tracker = Arc::clone(&tracker);
        tokio::spawn(async move {
            let mut last = 0;
            for _ in 0..100 {
                let summary = tracker.summarize(None);
                let per_provider: u64 = summary.providers.values().map(|u| u.calls).sum();
                assert_eq!(per_provider, summary.total_calls);
                assert!(summary.total_calls >= last);
                last = summary.total_calls;
                tokio::task::yield_now().await;
            }
        })
    };

    for writer in writers {
        writer.await.expect("writer task");
    }
    reader.await.expect("reader task");

    let total = WRITERS * PER_WRITER;
    assert_eq!(tracker.len(), total);

    let summary = tracker.summarize(None);
    assert_eq!(summary.total_calls, total as u64);
    for id in ["gemini", "openai"] {
        let usage = &summary.providers[id];
        assert_eq!(usage.calls, (total / 2) as u64);
        assert_eq!(usage.success + usage.timeout, usage.calls);
        assert_eq!(usage.timeout, (WRITERS / 2 * PER_WRITER / 5) as u64);
    }
}
