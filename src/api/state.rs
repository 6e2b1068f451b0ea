use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::Category,
    services::{FuzzyFilter, MetadataProvider, MetadataService, SimilarityEngine},
    store::{Cache, Dataset, DatasetStore, SessionStore},
};

/// Shared application state
///
/// Everything here is either read-only after startup (datasets, engine,
/// filter) or internally synchronized (metadata cache, sessions).
#[derive(Clone)]
pub struct AppState {
    pub datasets: DatasetStore,
    pub metadata: MetadataService,
    pub sessions: SessionStore,
    pub engine: SimilarityEngine,
    pub filter: FuzzyFilter,
}

impl AppState {
    /// Wires the services together from configuration
    pub fn new(
        config: &Config,
        datasets: DatasetStore,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self {
            datasets,
            metadata: MetadataService::new(
                provider,
                Cache::new(config.metadata_cache_capacity),
                config.cache_failures,
            ),
            sessions: SessionStore::new(config.session_capacity),
            engine: SimilarityEngine::default(),
            filter: FuzzyFilter::new(config.fuzzy_threshold, config.fuzzy_limit),
        }
    }

    /// Dataset for `category`; every category is loaded at startup
    pub fn dataset(&self, category: Category) -> AppResult<Arc<Dataset>> {
        self.datasets
            .get(category)
            .ok_or_else(|| AppError::Internal(format!("{} dataset not loaded", category)))
    }
}
