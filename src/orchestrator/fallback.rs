use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{ProviderSettings, ScoringConfig};
use crate::model::IntentLabel;
use crate::provider::{ProviderAdapter, ProviderError, ProviderRegistry};
use crate::usage::{AttemptOutcome, ProviderAttempt, UsageTracker};

use super::error::{ConfigurationError, ResolveError};
use super::rate_limit::RateLimiter;

/// Retry budget and timing for one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt, per provider.
    pub max_retries_per_provider: u32,
    pub per_call_timeout: Duration,
    /// Fixed pause before retrying the same provider.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        ScoringConfig::default().retry_policy()
    }
}

/// Position of a resolution in the provider/retry grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveState {
    Pending,
    Attempting { provider: usize, retry: u32 },
    Exhausted,
}

impl ResolveState {
    /// The state entered from `Pending`.
    pub fn start(provider_count: usize) -> Self {
        if provider_count == 0 {
            ResolveState::Exhausted
        } else {
            ResolveState::Attempting {
                provider: 0,
                retry: 0,
            }
        }
    }

    /// The state after the current attempt failed.
    pub fn after_failure(self, provider_count: usize, max_retries: u32) -> Self {
        match self {
            ResolveState::Pending => Self::start(provider_count),
            ResolveState::Attempting { provider, retry } if retry < max_retries => {
                ResolveState::Attempting {
                    provider,
                    retry: retry + 1,
                }
            }
            ResolveState::Attempting { provider, .. } if provider + 1 < provider_count => {
                ResolveState::Attempting {
                    provider: provider + 1,
                    retry: 0,
                }
            }
            ResolveState::Attempting { .. } | ResolveState::Exhausted => ResolveState::Exhausted,
        }
    }
}

/// A label accepted from one provider, plus the log of every attempt made.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub label: IntentLabel,
    pub reasoning: String,
    pub provider_id: String,
    pub attempts: Vec<ProviderAttempt>,
}

struct ProviderSlot {
    adapter: Arc<dyn ProviderAdapter>,
    limiter: Option<Arc<RateLimiter>>,
}

/// Runs the retry/fallback state machine over an ordered provider list.
///
/// Holds no per-lead state, so one orchestrator serves any number of
/// concurrent resolutions.
pub struct FallbackOrchestrator {
    providers: Vec<ProviderSlot>,
    policy: RetryPolicy,
    tracker: Arc<UsageTracker>,
}

impl std::fmt::Debug for FallbackOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackOrchestrator")
            .field("providers", &self.provider_ids())
            .field("policy", &self.policy)
            .finish()
    }
}

impl FallbackOrchestrator {
    pub fn new(
        providers: Vec<Arc<dyn ProviderAdapter>>,
        policy: RetryPolicy,
        tracker: Arc<UsageTracker>,
    ) -> Result<Self, ConfigurationError> {
        if providers.is_empty() {
            return Err(ConfigurationError::NoProviders);
        }
        let providers = providers
            .into_iter()
            .map(|adapter| ProviderSlot {
                adapter,
                limiter: None,
            })
            .collect();
        Ok(Self {
            providers,
            policy,
            tracker,
        })
    }

    /// Builds the effective provider sequence from configuration.
    ///
    /// Every id in the sequence must be registered; configured rate limits
    /// are attached to their providers.
    pub fn from_config(
        scoring: &ScoringConfig,
        settings: &ProviderSettings,
        registry: &ProviderRegistry,
        tracker: Arc<UsageTracker>,
    ) -> Result<Self, ConfigurationError> {
        let sequence = scoring.provider_sequence()?;
        let adapters = sequence
            .iter()
            .map(|id| {
                registry
                    .get(id)
                    .ok_or_else(|| ConfigurationError::UnknownProvider { id: id.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut orchestrator = Self::new(adapters, scoring.retry_policy(), tracker)?;
        for id in &sequence {
            if let Some(rpm) = settings.rate_limit_for(id) {
                orchestrator = orchestrator.with_rate_limit(id, RateLimiter::per_minute(rpm));
            }
        }

        info!(
            providers = ?orchestrator.provider_ids(),
            max_retries = scoring.max_retries_per_provider,
            timeout_ms = scoring.per_call_timeout.as_millis() as u64,
            "fallback orchestrator configured"
        );
        Ok(orchestrator)
    }

    /// Attaches a limiter awaited before every call to `provider_id`.
    pub fn with_rate_limit(mut self, provider_id: &str, limiter: RateLimiter) -> Self {
        let limiter = Arc::new(limiter);
        for slot in self
            .providers
            .iter_mut()
            .filter(|slot| slot.adapter.id() == provider_id)
        {
            slot.limiter = Some(Arc::clone(&limiter));
        }
        self
    }

    pub fn provider_ids(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|slot| slot.adapter.id().to_string())
            .collect()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn tracker(&self) -> &Arc<UsageTracker> {
        &self.tracker
    }

    /// Free slots in the current window for every rate-limited provider.
    pub fn rate_limit_remaining(&self) -> BTreeMap<String, usize> {
        self.providers
            .iter()
            .filter_map(|slot| {
                let limiter = slot.limiter.as_ref()?;
                Some((slot.adapter.id().to_string(), limiter.remaining()))
            })
            .collect()
    }

    pub async fn resolve(&self, prompt: &str) -> Result<Resolution, ResolveError> {
        self.resolve_with_cancel(prompt, &CancellationToken::new())
            .await
    }

    /// Resolves an intent label, checking `cancel` before each new attempt.
    ///
    /// A wait for a rate-limit slot ends as soon as `cancel` fires. A call
    /// already in flight always completes or times out and is recorded.
    pub async fn resolve_with_cancel(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<Resolution, ResolveError> {
        let provider_count = self.providers.len();
        let max_retries = self.policy.max_retries_per_provider;
        let mut attempts = Vec::new();
        let mut state = ResolveState::start(provider_count);

        while let ResolveState::Attempting { provider, retry } = state {
            if retry > 0 && !self.policy.retry_delay.is_zero() {
                tokio::time::sleep(self.policy.retry_delay).await;
            }
            if cancel.is_cancelled() {
                debug!(attempts = attempts.len(), "resolution cancelled");
                return Err(ResolveError::Cancelled { attempts });
            }

            let Some(slot) = self.providers.get(provider) else {
                break;
            };
            let provider_id = slot.adapter.id();

            if let Some(limiter) = &slot.limiter {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!(
                            provider = provider_id,
                            attempts = attempts.len(),
                            "resolution cancelled while waiting for rate limit"
                        );
                        return Err(ResolveError::Cancelled { attempts });
                    }
                    _ = limiter.acquire() => {}
                }
            }
            let attempt = retry + 1;

            let timeout = self.policy.per_call_timeout;
            let started_at = Utc::now();
            let clock = Instant::now();
            let result = tokio::time::timeout(timeout, slot.adapter.classify(prompt, timeout))
                .await
                .unwrap_or(Err(ProviderError::Timeout(timeout)));
            let duration = clock.elapsed();

            match result {
                Ok(classification) => {
                    let record = ProviderAttempt {
                        provider_id: provider_id.to_string(),
                        attempt,
                        started_at,
                        duration,
                        outcome: AttemptOutcome::Success,
                        cost_estimate: self.tracker.estimate_cost(
                            provider_id,
                            classification.tokens_in,
                            classification.tokens_out,
                        ),
                        tokens: classification
                            .tokens_in
                            .saturating_add(classification.tokens_out),
                        detail: None,
                    };
                    self.tracker.record(record.clone());
                    attempts.push(record);

                    debug!(
                        provider = provider_id,
                        attempt,
                        label = %classification.label,
                        "provider classified prompt"
                    );
                    return Ok(Resolution {
                        label: classification.label,
                        reasoning: classification.reasoning,
                        provider_id: provider_id.to_string(),
                        attempts,
                    });
                }
                Err(error) => {
                    warn!(
                        provider = provider_id,
                        attempt,
                        error = %error,
                        "provider attempt failed"
                    );
                    let record = ProviderAttempt {
                        provider_id: provider_id.to_string(),
                        attempt,
                        started_at,
                        duration,
                        outcome: AttemptOutcome::from(&error),
                        cost_estimate: 0.0,
                        tokens: 0,
                        detail: Some(error.to_string()),
                    };
                    self.tracker.record(record.clone());
                    attempts.push(record);
                    state = state.after_failure(provider_count, max_retries);
                }
            }
        }

        warn!(attempts = attempts.len(), "all providers exhausted");
        self.tracker.record_exhaustion(Utc::now());
        Err(ResolveError::AllProvidersExhausted { attempts })
    }
}
