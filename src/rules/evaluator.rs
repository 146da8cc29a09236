use tracing::trace;

use crate::constants::{
    COMPLETE_DATA_POINTS, DECISION_MAKER_KEYWORDS, GENERIC_INDUSTRY_WORDS, INDUSTRY_FAMILIES,
    INFLUENCER_KEYWORDS, MIN_SHARED_TOKEN_LEN,
};
use crate::model::{Lead, Offer};

use super::keywords::{contains_any, normalize, tokenize};
use super::types::{IndustryMatch, RoleCategory, RuleBreakdown};

/// Stateless rule scorer. Never fails and never suspends.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator;

impl RuleEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Scores `lead` against `offer`, returning the per-bucket breakdown.
    ///
    /// Use [`RuleBreakdown::score`] for the capped total.
    pub fn evaluate(&self, lead: &Lead, offer: &Offer) -> RuleBreakdown {
        let role = Self::classify_role(&lead.role);
        let industry = Self::match_industry(&lead.industry, &offer.ideal_use_cases);
        let completeness_points = if lead.is_complete() {
            COMPLETE_DATA_POINTS
        } else {
            0
        };

        let breakdown = RuleBreakdown {
            role,
            industry,
            role_points: role.points(),
            industry_points: industry.points(),
            completeness_points,
        };

        trace!(lead = %lead.id, score = breakdown.score(), %breakdown, "rule evaluation");
        breakdown
    }

    /// Convenience wrapper returning only the capped rule score.
    pub fn score(&self, lead: &Lead, offer: &Offer) -> u8 {
        self.evaluate(lead, offer).score()
    }

    pub fn classify_role(role: &str) -> RoleCategory {
        let tokens = tokenize(role);
        if contains_any(&tokens, DECISION_MAKER_KEYWORDS) {
            RoleCategory::DecisionMaker
        } else if contains_any(&tokens, INFLUENCER_KEYWORDS) {
            RoleCategory::Influencer
        } else {
            RoleCategory::Other
        }
    }

    pub fn match_industry(industry: &str, use_cases: &[String]) -> IndustryMatch {
        let industry_norm = normalize(industry);
        if industry_norm.is_empty() {
            return IndustryMatch::None;
        }

        if use_cases.iter().any(|uc| normalize(uc) == industry_norm) {
            return IndustryMatch::Exact;
        }

        let industry_tokens = tokenize(industry);
        let related = use_cases.iter().any(|uc| {
            let uc_tokens = tokenize(uc);
            same_family(&industry_tokens, &uc_tokens)
                || shares_significant_token(&industry_tokens, &uc_tokens)
        });

        if related {
            IndustryMatch::Related
        } else {
            IndustryMatch::None
        }
    }
}

fn same_family(a: &[String], b: &[String]) -> bool {
    INDUSTRY_FAMILIES
        .iter()
        .any(|family| contains_any(a, family) && contains_any(b, family))
}

fn shares_significant_token(a: &[String], b: &[String]) -> bool {
    a.iter().any(|token| {
        token.chars().count() >= MIN_SHARED_TOKEN_LEN
            && !GENERIC_INDUSTRY_WORDS.contains(&token.as_str())
            && b.contains(token)
    })
}
