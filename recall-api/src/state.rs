use std::sync::{Arc, Mutex as StdMutex};

use recall_classifier::ProfileCache;
use recall_core::config::RecallConfig;
use recall_core::traits::EmbeddingProvider;
use recall_decay::DecayEngine;
use recall_storage::StorageEngine;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;

/// `Uninitialized -> Initialized -> Closed`. `initialize` is a no-op once
/// past `Uninitialized`; every other operation requires `Initialized`.
pub(crate) enum State {
    Uninitialized,
    Initialized(Box<Collaborators>),
    Closed,
}

/// Everything a live engine needs. Held behind one `Box` inside `State` so
/// `reset`/`close` can drop it all — including aborting the decay task —
/// in one move.
pub(crate) struct Collaborators {
    pub config: RecallConfig,
    pub storage: Arc<StorageEngine>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub profile_cache: ProfileCache,
    /// Guards multi-step mutating operations (`add`, `update`, `delete`,
    /// `consolidate_memories`, ...). Reads never take this.
    pub write_lock: AsyncMutex<()>,
    /// Shared with the background decay task so a manual `process_decay`
    /// call and the unattended loop schedule off the same clock.
    pub decay_engine: Arc<StdMutex<DecayEngine>>,
    pub decay_task: StdMutex<Option<JoinHandle<()>>>,
}

impl Drop for Collaborators {
    fn drop(&mut self) {
        if let Some(handle) = self.decay_task.lock().unwrap().take() {
            handle.abort();
        }
    }
}
