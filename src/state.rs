//! Shared application state injected into every route handler.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{dao::room_store::RoomStore, topics::TopicSource};

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state holding the datastore handle and the topic
/// strategies. Collaborators are injected by the binary (or by tests) rather
/// than reached through process-wide globals.
pub struct AppState {
    room_store: Arc<dyn RoomStore>,
    pool_source: Arc<dyn TopicSource>,
    generative_source: Option<Arc<dyn TopicSource>>,
    rotation_gate: Mutex<()>,
}

impl AppState {
    /// Assemble the state from explicitly constructed collaborators.
    pub fn new(
        room_store: Arc<dyn RoomStore>,
        pool_source: Arc<dyn TopicSource>,
        generative_source: Option<Arc<dyn TopicSource>>,
    ) -> SharedState {
        Arc::new(Self {
            room_store,
            pool_source,
            generative_source,
            rotation_gate: Mutex::new(()),
        })
    }

    /// Handle to the debate room collection.
    pub fn room_store(&self) -> Arc<dyn RoomStore> {
        self.room_store.clone()
    }

    /// Fixed-pool topic strategy.
    pub fn pool_source(&self) -> Arc<dyn TopicSource> {
        self.pool_source.clone()
    }

    /// Generative topic strategy, present only when its credential is configured.
    pub fn generative_source(&self) -> Option<Arc<dyn TopicSource>> {
        self.generative_source.clone()
    }

    /// Gate serializing rotation runs within this process.
    ///
    /// Held for the whole deactivate-then-create cycle so two concurrent
    /// triggers cannot interleave their datastore writes.
    pub fn rotation_gate(&self) -> &Mutex<()> {
        &self.rotation_gate
    }
}
