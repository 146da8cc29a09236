use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::{Lead, Offer};
use crate::scoring::BatchEntry;

use super::ScoringStore;
use super::error::StorageError;

#[derive(Default)]
struct Session {
    offer: Option<Arc<Offer>>,
    leads: Arc<[Lead]>,
    results: Arc<[BatchEntry]>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    session: RwLock<Session>,
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.session.read();
        f.debug_struct("InMemoryStore")
            .field("has_offer", &session.offer.is_some())
            .field("leads", &session.leads.len())
            .field("results", &session.results.len())
            .finish()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoringStore for InMemoryStore {
    fn put_offer(&self, offer: Offer) -> Result<Arc<Offer>, StorageError> {
        let offer = Arc::new(offer);
        self.session.write().offer = Some(Arc::clone(&offer));
        Ok(offer)
    }

    fn offer(&self) -> Result<Option<Arc<Offer>>, StorageError> {
        Ok(self.session.read().offer.clone())
    }

    fn put_leads(&self, leads: Vec<Lead>) -> Result<Arc<[Lead]>, StorageError> {
        let leads: Arc<[Lead]> = leads.into();
        let mut session = self.session.write();
        session.leads = Arc::clone(&leads);
        session.results = Arc::from(Vec::new());
        Ok(leads)
    }

    fn leads(&self) -> Result<Arc<[Lead]>, StorageError> {
        Ok(Arc::clone(&self.session.read().leads))
    }

    fn put_results(&self, results: Vec<BatchEntry>) -> Result<(), StorageError> {
        self.session.write().results = results.into();
        Ok(())
    }

    fn results(&self) -> Result<Arc<[BatchEntry]>, StorageError> {
        Ok(Arc::clone(&self.session.read().results))
    }
}
