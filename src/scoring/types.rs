use serde::Serialize;

use crate::model::{IntentLabel, Lead, LeadId};
use crate::rules::RuleBreakdown;
use crate::usage::ProviderAttempt;

use super::error::FailureReason;

/// AI half of a score, combined with the rule score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedScore {
    pub rule_score: u8,
    pub ai_score: u8,
    pub final_score: u8,
    pub intent_label: IntentLabel,
    pub reasoning: String,
}

/// A fully scored lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredLead {
    pub lead_id: LeadId,
    pub name: String,
    pub role: String,
    pub company: String,
    pub rule_score: u8,
    pub ai_score: u8,
    pub final_score: u8,
    pub intent_label: IntentLabel,
    pub reasoning: String,
    /// Provider whose label was accepted.
    pub provider_id: String,
    pub rule_breakdown: RuleBreakdown,
    pub attempts: Vec<ProviderAttempt>,
}

impl ScoredLead {
    pub(crate) fn new(
        lead: &Lead,
        breakdown: RuleBreakdown,
        combined: CombinedScore,
        provider_id: String,
        attempts: Vec<ProviderAttempt>,
    ) -> Self {
        Self {
            lead_id: lead.id,
            name: lead.name.trim().to_string(),
            role: lead.role.trim().to_string(),
            company: lead.company.trim().to_string(),
            rule_score: combined.rule_score,
            ai_score: combined.ai_score,
            final_score: combined.final_score,
            intent_label: combined.intent_label,
            reasoning: combined.reasoning,
            provider_id,
            rule_breakdown: breakdown,
            attempts,
        }
    }
}

/// A lead that could not be scored, with the attempts made before giving up.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("lead {lead_id} not scored: {reason}")]
pub struct ScoringFailure {
    pub lead_id: LeadId,
    pub reason: FailureReason,
    pub partial_attempts: Vec<ProviderAttempt>,
}

pub type LeadOutcome = Result<ScoredLead, ScoringFailure>;

/// One batch result, in input order.
pub type BatchEntry = (LeadId, LeadOutcome);
