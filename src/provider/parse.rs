use serde::Deserialize;

use crate::constants::MAX_REASONING_CHARS;
use crate::model::IntentLabel;

use super::error::ProviderError;
use super::prompt::truncate_chars;

/// A validated provider answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub label: IntentLabel,
    pub reasoning: String,
}

#[derive(Deserialize)]
struct RawVerdict {
    intent: String,
    reasoning: String,
}

/// Parses the `{"intent": ..., "reasoning": ...}` payload out of model text.
///
/// Text around the outermost JSON object (code fences, a leading sentence) is
/// ignored. The object itself must carry string `intent` and `reasoning`
/// fields and the intent must name one of the three labels; nothing is
/// guessed from free text.
pub fn parse_verdict(content: &str) -> Result<Verdict, ProviderError> {
    let start = content
        .find('{')
        .ok_or_else(|| ProviderError::malformed("no JSON object in response"))?;
    let end = content
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| ProviderError::malformed("unterminated JSON object in response"))?;

    let raw: RawVerdict = serde_json::from_str(&content[start..=end])
        .map_err(|e| ProviderError::malformed(format!("payload failed schema validation: {e}")))?;

    let label = raw
        .intent
        .parse::<IntentLabel>()
        .map_err(|e| ProviderError::malformed(e.to_string()))?;

    Ok(Verdict {
        label,
        reasoning: truncate_chars(raw.reasoning.trim(), MAX_REASONING_CHARS).to_string(),
    })
}
