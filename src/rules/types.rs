use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DECISION_MAKER_POINTS, EXACT_INDUSTRY_POINTS, INFLUENCER_POINTS, MAX_RULE_SCORE,
    OTHER_INDUSTRY_POINTS, OTHER_ROLE_POINTS, RELATED_INDUSTRY_POINTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Seniority bucket derived from a job title.
pub enum RoleCategory {
    DecisionMaker,
    Influencer,
    Other,
}

impl RoleCategory {
    pub fn points(&self) -> u8 {
        match self {
            RoleCategory::DecisionMaker => DECISION_MAKER_POINTS,
            RoleCategory::Influencer => INFLUENCER_POINTS,
            RoleCategory::Other => OTHER_ROLE_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// How a lead's industry relates to the offer's ideal use cases.
pub enum IndustryMatch {
    Exact,
    Related,
    None,
}

impl IndustryMatch {
    pub fn points(&self) -> u8 {
        match self {
            IndustryMatch::Exact => EXACT_INDUSTRY_POINTS,
            IndustryMatch::Related => RELATED_INDUSTRY_POINTS,
            IndustryMatch::None => OTHER_INDUSTRY_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Per-bucket result of a rule evaluation.
pub struct RuleBreakdown {
    pub role: RoleCategory,
    pub industry: IndustryMatch,
    pub role_points: u8,
    pub industry_points: u8,
    pub completeness_points: u8,
}

impl RuleBreakdown {
    /// Sum of the buckets, capped at [`MAX_RULE_SCORE`].
    pub fn score(&self) -> u8 {
        self.role_points
            .saturating_add(self.industry_points)
            .saturating_add(self.completeness_points)
            .min(MAX_RULE_SCORE)
    }
}

impl fmt::Display for RuleBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Role: {}pts | Industry: {}pts | Completeness: {}pts",
            self.role_points, self.industry_points, self.completeness_points
        )
    }
}
