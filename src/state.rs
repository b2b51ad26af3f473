use std::sync::Arc;

use boighor_backend::relay::DocumentRelay;
use boighor_backend::search::SearchEngine;
use boighor_backend::store::RecordStore;

/// Shared handler state
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub search: SearchEngine,
    pub relay: DocumentRelay,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, relay: DocumentRelay) -> Self {
        Self {
            search: SearchEngine::new(store.clone()),
            store,
            relay,
        }
    }
}
