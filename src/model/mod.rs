//! Scoring inputs and outputs shared by every stage of the pipeline.

pub mod intent;
pub mod lead;
pub mod offer;

#[cfg(test)]
mod tests;

pub use intent::{IntentLabel, ParseIntentError};
pub use lead::{Lead, LeadId};
pub use offer::Offer;
