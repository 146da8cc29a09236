//! Shared leads, offers and scorer builders for integration tests.

use std::sync::Arc;
use std::time::Duration;

use leadscore::{
    FallbackOrchestrator, HybridScorer, Lead, Offer, PromptLimits, ProviderAdapter, RetryPolicy,
    UsageTracker,
};

pub const FAST_TIMEOUT: Duration = Duration::from_millis(60);

pub fn outreach_offer() -> Offer {
    Offer::new(
        "AI Outreach Automation",
        vec!["24/7 automated outreach", "6x more qualified meetings"],
        vec!["software", "B2B SaaS mid-market"],
    )
}

/// Builder for leads with sensible defaults.
pub struct LeadBuilder {
    name: String,
    role: String,
    company: String,
    industry: String,
    location: String,
    bio: String,
}

impl Default for LeadBuilder {
    fn default() -> Self {
        Self {
            name: "Ava Patel".to_string(),
            role: "Head of Growth".to_string(),
            company: "FlowMetrics".to_string(),
            industry: "software".to_string(),
            location: "San Francisco".to_string(),
            bio: "Leads a lean revenue team.".to_string(),
        }
    }
}

impl LeadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: &str) -> Self {
        self.role = role.to_string();
        self
    }

    pub fn industry(mut self, industry: &str) -> Self {
        self.industry = industry.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn bio(mut self, bio: &str) -> Self {
        self.bio = bio.to_string();
        self
    }

    pub fn build(self) -> Lead {
        Lead::new(
            self.name,
            self.role,
            self.company,
            self.industry,
            self.location,
            self.bio,
        )
    }
}

pub fn scorer(
    providers: Vec<Arc<dyn ProviderAdapter>>,
    max_retries: u32,
) -> (HybridScorer, Arc<UsageTracker>) {
    scorer_with_concurrency(providers, max_retries, 8)
}

pub fn scorer_with_concurrency(
    providers: Vec<Arc<dyn ProviderAdapter>>,
    max_retries: u32,
    max_concurrency: usize,
) -> (HybridScorer, Arc<UsageTracker>) {
    let tracker = Arc::new(UsageTracker::new());
    let policy = RetryPolicy {
        max_retries_per_provider: max_retries,
        per_call_timeout: FAST_TIMEOUT,
        retry_delay: Duration::ZERO,
    };
    let orchestrator = FallbackOrchestrator::new(providers, policy, Arc::clone(&tracker))
        .expect("providers configured");
    (
        HybridScorer::new(orchestrator, PromptLimits::default(), max_concurrency),
        tracker,
    )
}
