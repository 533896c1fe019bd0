//! # recall-core
//!
//! Foundation crate for the Recall memory engine. Defines the memory node
//! and relationship-edge data model, the `MemoryStorage` and
//! `EmbeddingProvider` collaborator traits, the closed `RecallError` set,
//! and the aggregate `RecallConfig`. Every other crate in the workspace
//! depends on this one.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod tie_break;
pub mod tokenize;
pub mod traits;

pub use config::RecallConfig;
pub use errors::{RecallError, RecallResult};
pub use memory::{Confidence, Importance, MemoryNode, MemorySource, RelationshipEdge, RelationshipType};
pub use tie_break::compare_nodes;
pub use tokenize::tokenize;
pub use traits::{EmbeddingProvider, MemoryStorage, StorageStats};
