//! # recall-storage
//!
//! SQLite-backed implementation of `recall_core::MemoryStorage`: schema,
//! connection pool (single writer + round-robin read pool), CRUD, tag
//! lookups, relationship edges, and brute-force vector search.

mod error;
mod pool;
mod queries;
mod schema;
mod vector;

pub use engine::StorageEngine;
pub use error::to_storage_error;

mod engine;
