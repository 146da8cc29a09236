use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use leadscore::scoring::HybridScorer;
use leadscore::storage::ScoringStore;

#[derive(Clone)]
pub struct HandlerState {
    pub scorer: Arc<HybridScorer>,

    pub store: Arc<dyn ScoringStore>,

    /// Cancelled on shutdown; running batches stop starting new provider calls.
    pub shutdown: CancellationToken,

    pub mock_provider: bool,
}

impl HandlerState {
    pub fn new(scorer: Arc<HybridScorer>, store: Arc<dyn ScoringStore>) -> Self {
        Self {
            scorer,
            store,
            shutdown: CancellationToken::new(),
            mock_provider: false,
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn with_mock_provider(mut self, mock_provider: bool) -> Self {
        self.mock_provider = mock_provider;
        self
    }
}
