//! # recall-api
//!
//! The `RecallEngine` facade: a handle type constructed from a config and
//! an embedder collaborator, carrying `Uninitialized -> Initialized ->
//! Closed` lifecycle, write serialization, and the background decay/prune
//! task. Every other crate in the workspace is pure (storage aside); this
//! is the only one that owns I/O orchestration and holds state.

mod decay_task;
mod engine;
mod options;
mod requests;
mod results;
mod state;

pub use engine::RecallEngine;
pub use options::RecallEngineOptions;
pub use recall_core::traits::StorageStats;
pub use recall_core::{RecallError, RecallResult};
pub use requests::AddRequest;
pub use results::{MemoryMetadata, SearchHit, UserContext};
