//! Session storage for the offer, the uploaded leads and their results.
//!
//! The scoring core never touches storage; the gateway reads inputs from a
//! [`ScoringStore`] and writes batch results back.

pub mod error;
pub mod memory;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::model::{Lead, Offer};
use crate::scoring::BatchEntry;

pub use error::StorageError;
pub use memory::InMemoryStore;

/// Get/put access to the current scoring session.
pub trait ScoringStore: Send + Sync {
    fn put_offer(&self, offer: Offer) -> Result<Arc<Offer>, StorageError>;

    fn offer(&self) -> Result<Option<Arc<Offer>>, StorageError>;

    /// Replaces the stored leads and drops results computed for the old ones.
    fn put_leads(&self, leads: Vec<Lead>) -> Result<Arc<[Lead]>, StorageError>;

    fn leads(&self) -> Result<Arc<[Lead]>, StorageError>;

    fn put_results(&self, results: Vec<BatchEntry>) -> Result<(), StorageError>;

    fn results(&self) -> Result<Arc<[BatchEntry]>, StorageError>;
}
