//! `StorageEngine` — owns the `ConnectionPool`, implements `MemoryStorage`.

use std::path::Path;

use recall_core::config::StorageConfig;
use recall_core::memory::{MemoryNode, RelationshipEdge};
use recall_core::traits::{MemoryStorage, StorageStats};
use recall_core::RecallResult;

use crate::pool::ConnectionPool;
use crate::queries::{memory_crud, relationship_ops, stats, tag_ops};

/// SQLite-backed `MemoryStorage`. Owns one writer connection and a
/// round-robin pool of reader connections; file-backed and shared-cache
/// in-memory databases both route reads through the pool.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, creating the schema
    /// if the file is new.
    pub fn open(path: &Path, config: &StorageConfig) -> RecallResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        Ok(Self { pool })
    }

    /// Open a storage engine over a shared-cache in-memory database. Every
    /// connection in the returned engine sees the same data.
    pub fn open_in_memory(config: &StorageConfig) -> RecallResult<Self> {
        let pool = ConnectionPool::open_in_memory(config)?;
        Ok(Self { pool })
    }

    fn with_reader<F, T>(&self, f: F) -> RecallResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> RecallResult<T>,
    {
        self.pool.readers.with_conn(f)
    }

    fn with_writer<F, T>(&self, f: F) -> RecallResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> RecallResult<T>,
    {
        self.pool.writer.with_conn(f)
    }
}

impl MemoryStorage for StorageEngine {
    fn put_node(&self, node: &MemoryNode) -> RecallResult<()> {
        self.with_writer(|conn| memory_crud::put_node(conn, node))
    }

    fn get_node(&self, id: &str) -> RecallResult<Option<MemoryNode>> {
        self.with_reader(|conn| memory_crud::get_node(conn, id))
    }

    fn delete_node(&self, id: &str) -> RecallResult<()> {
        self.with_writer(|conn| memory_crud::delete_node(conn, id))
    }

    fn add_edge(&self, edge: &RelationshipEdge) -> RecallResult<()> {
        self.with_writer(|conn| relationship_ops::add_edge(conn, edge))
    }

    fn get_all(&self) -> RecallResult<Vec<MemoryNode>> {
        self.with_reader(memory_crud::get_all)
    }

    fn get_static(&self, user_id: &str) -> RecallResult<Vec<MemoryNode>> {
        self.with_reader(|conn| tag_ops::get_static(conn, user_id))
    }

    fn get_by_tags(&self, tags: &[String]) -> RecallResult<Vec<MemoryNode>> {
        self.with_reader(|conn| tag_ops::get_by_tags(conn, tags))
    }

    fn stats(&self) -> RecallResult<StorageStats> {
        self.with_reader(stats::compute)
    }

    fn clear(&self) -> RecallResult<()> {
        self.with_writer(|conn| {
            conn.execute_batch("DELETE FROM relationships; DELETE FROM container_tags; DELETE FROM memories;")
                .map_err(crate::error::rusqlite_err)
        })
    }
}
