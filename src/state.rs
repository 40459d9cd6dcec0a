use std::sync::Arc;

use crate::services::providers::MetadataProvider;
use crate::services::RecommendationService;
use crate::store::ListStore;

/// Shared application state
///
/// Everything is behind an `Arc` so the router can be cloned per
/// connection; the concrete store and providers are chosen at startup
/// (and swapped for in-memory/stub versions in tests).
#[derive(Clone)]
pub struct AppState {
    pub lists: Arc<dyn ListStore>,
    pub recommender: Arc<RecommendationService>,
    pub metadata: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(
        lists: Arc<dyn ListStore>,
        recommender: Arc<RecommendationService>,
        metadata: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self {
            lists,
            recommender,
            metadata,
        }
    }
}
