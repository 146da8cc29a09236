use serde::{Deserialize, Serialize};

use crate::constants::{
    CHARS_PER_TOKEN, DEFAULT_BIO_CHARS, DEFAULT_USE_CASES_COUNT, DEFAULT_VALUE_PROPS_COUNT,
};
use crate::model::{Lead, Offer};

/// Caps applied to prompt inputs to bound request size and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptLimits {
    /// Max characters of the lead bio.
    pub bio_chars: usize,
    /// Max number of offer use cases.
    pub use_cases_count: usize,
    /// Max number of offer value props.
    pub value_props_count: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            bio_chars: DEFAULT_BIO_CHARS,
            use_cases_count: DEFAULT_USE_CASES_COUNT,
            value_props_count: DEFAULT_VALUE_PROPS_COUNT,
        }
    }
}

/// Renders the intent-classification prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    limits: PromptLimits,
}

impl PromptBuilder {
    pub fn new(limits: PromptLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PromptLimits {
        &self.limits
    }

    pub fn build(&self, lead: &Lead, offer: &Offer) -> String {
        let value_props = join_capped(&offer.value_props, self.limits.value_props_count);
        let use_cases = join_capped(&offer.ideal_use_cases, self.limits.use_cases_count);
        let bio = truncate_chars(lead.bio.trim(), self.limits.bio_chars);

        format!(
            "Analyze buying intent: High/Medium/Low\n\
             \n\
             Product: {product}\n\
             Value props: {value_props}\n\
             Use cases: {use_cases}\n\
             \n\
             Prospect: {name}, {role} at {company}\n\
             Industry: {industry}\n\
             Location: {location}\n\
             Bio: {bio}\n\
             \n\
             JSON only: {{\"intent\": \"High|Medium|Low\", \"reasoning\": \"Brief explanation\"}}",
            product = offer.name,
            name = lead.name.trim(),
            role = lead.role.trim(),
            company = lead.company.trim(),
            industry = lead.industry.trim(),
            location = lead.location.trim(),
        )
    }
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Rough token count (`ceil(chars / 4)`).
pub fn estimate_tokens(text: &str) -> u32 {
    let tokens = text.chars().count().div_ceil(CHARS_PER_TOKEN);
    u32::try_from(tokens).unwrap_or(u32::MAX)
}

fn join_capped(items: &[String], max: usize) -> String {
    items
        .iter()
        .take(max)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
