use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::constants::{GEMINI_PROVIDER_ID, OPENAI_PROVIDER_ID};

use super::adapter::ProviderAdapter;
use super::gemini::GeminiAdapter;
use super::offline::OfflineProvider;
use super::openai::OpenAiAdapter;

/// Adapters available to the orchestrator, keyed by provider id.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the adapters the configuration can back.
    ///
    /// In mock mode every known id is served by [`OfflineProvider`]. Otherwise
    /// a remote adapter is registered only when its API key is present.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();

        if config.mock_provider {
            info!("mock provider mode: classifying offline");
            registry.register(Arc::new(OfflineProvider::new(GEMINI_PROVIDER_ID)));
            registry.register(Arc::new(OfflineProvider::new(OPENAI_PROVIDER_ID)));
            return registry;
        }

        let settings = &config.providers;
        if settings.gemini_api_key.is_some() {
            registry.register(Arc::new(GeminiAdapter::new(settings.gemini_model.clone())));
        } else {
            warn!("GEMINI_API_KEY not set; gemini provider unavailable");
        }

        match &settings.openai_api_key {
            Some(key) => registry.register(Arc::new(OpenAiAdapter::with_base_url(
                key.clone(),
                settings.openai_model.clone(),
                settings.openai_base_url.clone(),
            ))),
            None => warn!("OPENAI_API_KEY not set; openai provider unavailable"),
        }

        registry
    }

    /// Adds an adapter, replacing any previous one with the same id.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.id().to_string(), adapter);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adapters.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.adapters.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
