use crate::constants::{
    HIGH_INTENT_POINTS, LOW_INTENT_POINTS, MAX_AI_SCORE, MAX_FINAL_SCORE, MAX_RULE_SCORE,
    MEDIUM_INTENT_POINTS,
};
use crate::model::IntentLabel;
use crate::rules::RuleBreakdown;

use super::error::ScoringError;
use super::types::CombinedScore;

/// Maps an intent label to points and adds the rule score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCombiner;

impl ScoreCombiner {
    pub fn new() -> Self {
        Self
    }

    pub fn ai_score(label: IntentLabel) -> u8 {
        match label {
            IntentLabel::High => HIGH_INTENT_POINTS,
            IntentLabel::Medium => MEDIUM_INTENT_POINTS,
            IntentLabel::Low => LOW_INTENT_POINTS,
        }
    }

    /// `Rule: <breakdown>. AI: <reasoning>`
    pub fn render_reasoning(breakdown: &RuleBreakdown, ai_reasoning: &str) -> String {
        format!("Rule: {breakdown}. AI: {}", ai_reasoning.trim())
    }

    /// Combines a rule score with an intent label. Pure and deterministic.
    ///
    /// Out-of-range inputs are reported, never clamped.
    pub fn combine(
        &self,
        rule_score: u8,
        intent_label: IntentLabel,
        reasoning: impl Into<String>,
    ) -> Result<CombinedScore, ScoringError> {
        if rule_score > MAX_RULE_SCORE {
            return Err(ScoringError::InvariantViolation {
                detail: format!("rule_score {rule_score} exceeds {MAX_RULE_SCORE}"),
            });
        }

        let ai_score = Self::ai_score(intent_label);
        if ai_score > MAX_AI_SCORE {
            return Err(ScoringError::InvariantViolation {
                detail: format!("ai_score {ai_score} exceeds {MAX_AI_SCORE}"),
            });
        }

        let final_score = rule_score
            .checked_add(ai_score)
            .filter(|score| *score <= MAX_FINAL_SCORE)
            .ok_or_else(|| ScoringError::InvariantViolation {
                detail: format!("final score {rule_score} + {ai_score} exceeds {MAX_FINAL_SCORE}"),
            })?;

        Ok(CombinedScore {
            rule_score,
            ai_score,
            final_score,
            intent_label,
            reasoning: reasoning.into(),
        })
    }
}
