use thiserror::Error;

use crate::usage::ProviderAttempt;

/// Invalid provider setup, reported before any lead is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no providers configured")]
    NoProviders,

    #[error("fallback is enabled but the provider order is empty")]
    EmptyProviderOrder,

    #[error("provider '{id}' is not registered")]
    UnknownProvider { id: String },
}

/// Why a resolution produced no label.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("all providers exhausted after {} attempts", .attempts.len())]
    AllProvidersExhausted { attempts: Vec<ProviderAttempt> },

    #[error("cancelled after {} attempts", .attempts.len())]
    Cancelled { attempts: Vec<ProviderAttempt> },
}

impl ResolveError {
    pub fn attempts(&self) -> &[ProviderAttempt] {
        match self {
            ResolveError::AllProvidersExhausted { attempts }
            | ResolveError::Cancelled { attempts } => attempts,
        }
    }

    pub fn into_attempts(self) -> Vec<ProviderAttempt> {
        match self {
            ResolveError::AllProvidersExhausted { attempts }
            | ResolveError::Cancelled { attempts } => attempts,
        }
    }
}
