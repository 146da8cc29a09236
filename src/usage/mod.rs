//! Per-attempt usage accounting.
//!
//! Every provider call made while scoring (successful or not) is recorded
//! as a [`ProviderAttempt`]. [`UsageTracker::summarize`] aggregates those
//! records into per-provider counts, latency and estimated cost.

pub mod tracker;
pub mod types;

#[cfg(test)]
mod tests;

pub use tracker::UsageTracker;
pub use types::{AttemptOutcome, Pricing, ProviderAttempt, ProviderUsage, UsageSummary};
