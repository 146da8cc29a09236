//! AI intent classification providers.
//!
//! Every provider implements [`ProviderAdapter::classify`]: send one prompt,
//! get back one validated [`IntentLabel`](crate::model::IntentLabel) or a
//! [`ProviderError`]. Adapters never retry; retry and fallback belong to
//! [`FallbackOrchestrator`](crate::orchestrator::FallbackOrchestrator).
//!
//! Both remote adapters funnel the model's text through
//! [`parse_verdict`], so the two vendor response shapes end up behind the
//! same strict schema check.

pub mod adapter;
pub mod error;
pub mod gemini;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod offline;
pub mod openai;
pub mod parse;
pub mod prompt;
pub mod registry;


pub use adapter::{Classification, ProviderAdapter};
pub use error::ProviderError;
pub use gemini::GeminiAdapter;
#[cfg(any(test, feature = "mock"))]
pub use mock::{ScriptStep, ScriptedProvider};
pub use offline::OfflineProvider;
pub use openai::OpenAiAdapter;
pub use parse::{Verdict, parse_verdict};
pub use prompt::{PromptBuilder, PromptLimits, estimate_tokens};
pub use registry::ProviderRegistry;
