//! Deterministic rule scoring of a lead against an offer.
//!
//! Three independent buckets are summed and capped at
//! [`MAX_RULE_SCORE`](crate::constants::MAX_RULE_SCORE):
//!
//! | Bucket       | Points                                        |
//! |--------------|-----------------------------------------------|
//! | Role         | decision maker 20, influencer 10, other 0     |
//! | Industry     | exact use-case match 20, related 10, none 0   |
//! | Completeness | 10 if every lead field is filled, else 0      |
//!
//! Keyword lookups work on word tokens rather than raw substrings, so
//! `"Coordinator"` is never read as `"coo"`.

pub mod evaluator;
pub mod keywords;
pub mod types;


pub use evaluator::RuleEvaluator;
pub use types::{IndustryMatch, RoleCategory, RuleBreakdown};
