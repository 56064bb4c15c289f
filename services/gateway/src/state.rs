//! Shared application state

use league_engine::LeagueStore;
use scoreboard::Topic;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::catalog_loader::CatalogSource;

/// Buffered invalidations per lagging subscriber before a forced resync.
const INVALIDATION_BUFFER: usize = 256;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LeagueStore>,
    /// Invalidation fan-out; each WS client filters by its subscriptions.
    pub invalidations: broadcast::Sender<Vec<Topic>>,
    pub http_client: reqwest::Client,
    pub catalog_source: CatalogSource,
}

impl AppState {
    pub fn new(store: Arc<LeagueStore>, catalog_source: CatalogSource) -> Self {
        let (invalidations, _) = broadcast::channel(INVALIDATION_BUFFER);
        Self {
            store,
            invalidations,
            http_client: reqwest::Client::new(),
            catalog_source,
        }
    }

    /// Fire an invalidation after a successful mutation. Having no
    /// listeners is normal, not an error.
    pub fn publish(&self, topics: Vec<Topic>) {
        debug!(topics = topics.len(), "publishing invalidation");
        let _ = self.invalidations.send(topics);
    }
}
