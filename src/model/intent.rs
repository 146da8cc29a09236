use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Buying-intent class produced by an AI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentLabel {
    High,
    Medium,
    Low,
}

/// Returned when a string is not one of `High`, `Medium`, `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid intent label (expected High, Medium or Low)")]
pub struct ParseIntentError {
    pub value: String,
}

impl IntentLabel {
    pub const ALL: [IntentLabel; 3] = [IntentLabel::High, IntentLabel::Medium, IntentLabel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::High => "High",
            IntentLabel::Medium => "Medium",
            IntentLabel::Low => "Low",
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentLabel {
    type Err = ParseIntentError;

    /// Case-insensitive; surrounding whitespace is ignored. Nothing else is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(IntentLabel::High),
            "medium" => Ok(IntentLabel::Medium),
            "low" => Ok(IntentLabel::Low),
            _ => Err(ParseIntentError {
                value: s.to_string(),
            }),
        }
    }
}
