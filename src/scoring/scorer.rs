use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::{StreamExt, stream};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::model::{Lead, Offer};
use crate::orchestrator::{ConfigurationError, FallbackOrchestrator, ResolveError};
use crate::provider::{PromptBuilder, PromptLimits, ProviderRegistry};
use crate::rules::RuleEvaluator;
use crate::usage::{UsageSummary, UsageTracker};

use super::combiner::ScoreCombiner;
use super::error::FailureReason;
use super::types::{BatchEntry, LeadOutcome, ScoredLead, ScoringFailure};

/// Scores leads by combining rule evaluation with AI intent classification.
///
/// The rule score is computed synchronously first, then the prompt is sent
/// through the orchestrator. Leads in a batch are independent and run
/// concurrently up to `max_concurrency`.
pub struct HybridScorer {
    evaluator: RuleEvaluator,
    prompts: PromptBuilder,
    orchestrator: FallbackOrchestrator,
    combiner: ScoreCombiner,
    max_concurrency: usize,
}

impl std::fmt::Debug for HybridScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridScorer")
            .field("orchestrator", &self.orchestrator)
            .field("limits", self.prompts.limits())
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}

impl HybridScorer {
    pub fn new(
        orchestrator: FallbackOrchestrator,
        limits: PromptLimits,
        max_concurrency: usize,
    ) -> Self {
        Self {
            evaluator: RuleEvaluator::new(),
            prompts: PromptBuilder::new(limits),
            orchestrator,
            combiner: ScoreCombiner::new(),
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Wires a scorer from configuration and the registered providers.
    pub fn from_config(
        config: &Config,
        registry: &ProviderRegistry,
    ) -> Result<Self, ConfigurationError> {
        let tracker = Arc::new(UsageTracker::with_pricing(config.providers.pricing.clone()));
        let orchestrator = FallbackOrchestrator::from_config(
            &config.scoring,
            &config.providers,
            registry,
            tracker,
        )?;
        Ok(Self::new(
            orchestrator,
            config.scoring.prompt_limits,
            config.scoring.max_concurrency,
        ))
    }

    pub fn tracker(&self) -> &Arc<UsageTracker> {
        self.orchestrator.tracker()
    }

    pub fn orchestrator(&self) -> &FallbackOrchestrator {
        &self.orchestrator
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn score_lead(&self, lead: &Lead, offer: &Offer) -> LeadOutcome {
        self.score_lead_with_cancel(lead, offer, &CancellationToken::new())
            .await
    }

    #[instrument(skip(self, lead, offer, cancel), fields(lead = %lead.id))]
    pub async fn score_lead_with_cancel(
        &self,
        lead: &Lead,
        offer: &Offer,
        cancel: &CancellationToken,
    ) -> LeadOutcome {
        let breakdown = self.evaluator.evaluate(lead, offer);
        let rule_score = breakdown.score();
        let prompt = self.prompts.build(lead, offer);

        let resolution = match self.orchestrator.resolve_with_cancel(&prompt, cancel).await {
            Ok(resolution) => resolution,
            Err(err) => {
                warn!(error = %err, "lead not scored");
                let reason = match err {
                    ResolveError::AllProvidersExhausted { .. } => {
                        FailureReason::AllProvidersExhausted
                    }
                    ResolveError::Cancelled { .. } => FailureReason::Cancelled,
                };
                return Err(ScoringFailure {
                    lead_id: lead.id,
                    reason,
                    partial_attempts: err.into_attempts(),
                });
            }
        };

        let reasoning = ScoreCombiner::render_reasoning(&breakdown, &resolution.reasoning);
        match self
            .combiner
            .combine(rule_score, resolution.label, reasoning)
        {
            Ok(combined) => {
                info!(
                    rule_score = combined.rule_score,
                    ai_score = combined.ai_score,
                    final_score = combined.final_score,
                    provider = %resolution.provider_id,
                    "lead scored"
                );
                Ok(ScoredLead::new(
                    lead,
                    breakdown,
                    combined,
                    resolution.provider_id,
                    resolution.attempts,
                ))
            }
            Err(err) => {
                error!(error = %err, "discarding out-of-range score");
                Err(ScoringFailure {
                    lead_id: lead.id,
                    reason: err.into(),
                    partial_attempts: resolution.attempts,
                })
            }
        }
    }

    pub async fn score_batch(&self, leads: &[Lead], offer: &Offer) -> Vec<BatchEntry> {
        self.score_batch_with_cancel(leads, offer, &CancellationToken::new())
            .await
    }

    /// Scores every lead, returning one entry per lead in input order.
    ///
    /// After `cancel` fires, leads that have not started fail with
    /// [`FailureReason::Cancelled`]; calls already in flight finish first.
    #[instrument(skip_all, fields(leads = leads.len()))]
    pub async fn score_batch_with_cancel(
        &self,
        leads: &[Lead],
        offer: &Offer,
        cancel: &CancellationToken,
    ) -> Vec<BatchEntry> {
        let futures: Vec<_> = leads
            .iter()
            .map(|lead| async move {
                let outcome = self.score_lead_with_cancel(lead, offer, cancel).await;
                (lead.id, outcome)
            })
            .collect();
        let results: Vec<BatchEntry> = stream::iter(futures)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let scored = results.iter().filter(|(_, r)| r.is_ok()).count();
        info!(
            scored,
            failed = results.len() - scored,
            "batch complete"
        );
        results
    }

    pub fn usage_summary(&self, since: Option<DateTime<Utc>>) -> UsageSummary {
        self.tracker().summarize(since)
    }

    /// Clears the attempt log and exhaustion count.
    pub fn reset_usage(&self) {
        info!(attempts = self.tracker().len(), "usage history reset");
        self.tracker().reset();
    }
}
