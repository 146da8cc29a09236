//! Hybrid lead scoring.
//!
//! A lead's final score is `rule_score + ai_score`:
//!
//! | Part | Range | Source |
//! |------|-------|--------|
//! | `rule_score` | 0-50 | [`RuleEvaluator`](crate::rules::RuleEvaluator) |
//! | `ai_score` | 10, 30 or 50 | intent label via [`FallbackOrchestrator`](crate::orchestrator::FallbackOrchestrator) |
//! | `final_score` | 0-100 | [`ScoreCombiner`] |
//!
//! [`HybridScorer`] ties the pieces together for single leads and batches.
//! A failed lead is reported as a [`ScoringFailure`]; it never aborts the
//! rest of a batch.

pub mod combiner;
pub mod error;
pub mod scorer;
pub mod types;


pub use combiner::ScoreCombiner;
pub use error::{FailureReason, ScoringError};
pub use scorer::HybridScorer;
pub use types::{BatchEntry, CombinedScore, LeadOutcome, ScoredLead, ScoringFailure};
