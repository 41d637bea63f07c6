use std::sync::Arc;

use agora_feed::FeedAssembler;
use agora_store::{Engagement, InMemoryEntityStore, SocialGraph};

/// Shared handler state: the process-wide entity store.
#[derive(Clone, Debug)]
pub struct AppState {
    store: Arc<InMemoryEntityStore>,
}

impl AppState {
    pub fn new(store: InMemoryEntityStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &InMemoryEntityStore {
        &self.store
    }

    pub fn graph(&self) -> SocialGraph<'_> {
        SocialGraph::new(&self.store)
    }

    pub fn engagement(&self) -> Engagement<'_> {
        Engagement::new(&self.store)
    }

    pub fn feed(&self) -> FeedAssembler<'_> {
        FeedAssembler::new(&self.store)
    }
}
