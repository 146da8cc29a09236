//! Leadscore library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Lead`], [`Offer`], [`IntentLabel`] - Scoring inputs and labels
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`HybridScorer`] - Single-lead and batch scoring entry points
//! - [`ScoredLead`], [`ScoringFailure`] - Per-lead results
//!
//! ## Pipeline Stages
//! - [`RuleEvaluator`] - Deterministic rule score (0-50)
//! - [`ProviderAdapter`], [`GeminiAdapter`], [`OpenAiAdapter`] - Intent classification
//! - [`FallbackOrchestrator`] - Retry, timeout and provider fallback
//! - [`ScoreCombiner`] - Final score (0-100)
//! - [`UsageTracker`], [`UsageSummary`] - Attempt log and cost estimates
//!
//! ## Storage
//! - [`ScoringStore`], [`InMemoryStore`] - Offer, leads and results of a session
//!
//! ## Test/Mock Support
//! [`ScriptedProvider`] is available behind `#[cfg(any(test, feature = "mock"))]`.
//! [`OfflineProvider`] is always built; it backs `LEADSCORE_MOCK_PROVIDER`.

pub mod config;
pub mod constants;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod rules;
pub mod scoring;
pub mod storage;
pub mod usage;

pub use config::{Config, ConfigError, ProviderSettings, ScoringConfig};
pub use model::{IntentLabel, Lead, LeadId, Offer, ParseIntentError};
pub use orchestrator::{
    ConfigurationError, FallbackOrchestrator, RateLimiter, Resolution, ResolveError,
    ResolveState, RetryPolicy,
};
#[cfg(any(test, feature = "mock"))]
pub use provider::{ScriptStep, ScriptedProvider};
pub use provider::{
    Classification, GeminiAdapter, OfflineProvider, OpenAiAdapter, PromptBuilder, PromptLimits,
    ProviderAdapter, ProviderError, ProviderRegistry,
};
pub use rules::{IndustryMatch, RoleCategory, RuleBreakdown, RuleEvaluator};
pub use scoring::{
    BatchEntry, CombinedScore, FailureReason, HybridScorer, LeadOutcome, ScoreCombiner,
    ScoredLead, ScoringError, ScoringFailure,
};
pub use storage::{InMemoryStore, ScoringStore, StorageError};
pub use usage::{AttemptOutcome, Pricing, ProviderAttempt, ProviderUsage, UsageSummary, UsageTracker};
