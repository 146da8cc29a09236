use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("score invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

/// Why a lead has no score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("all providers exhausted")]
    AllProvidersExhausted,

    #[error("score invariant violated: {detail}")]
    InvariantViolation { detail: String },

    #[error("scoring cancelled")]
    Cancelled,
}

impl From<ScoringError> for FailureReason {
    fn from(error: ScoringError) -> Self {
        match error {
            ScoringError::InvariantViolation { detail } => {
                FailureReason::InvariantViolation { detail }
            }
        }
    }
}
