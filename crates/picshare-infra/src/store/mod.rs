//! In-memory store - an isolated backend per instance.

mod memory;

pub use memory::InMemoryStore;

use std::sync::Arc;

use picshare_core::PersistenceContext;

/// Build a [`PersistenceContext`] backed by a fresh [`InMemoryStore`].
pub fn context() -> PersistenceContext {
    InMemoryStore::new().into_context()
}

impl InMemoryStore {
    /// Share this store behind every repository handle of a context.
    pub fn into_context(self) -> PersistenceContext {
        let store = Arc::new(self);
        PersistenceContext {
            users: store.clone(),
            posts: store.clone(),
            media: store.clone(),
            comments: store.clone(),
            likes: store.clone(),
            follows: store.clone(),
            stories: store,
        }
    }
}
