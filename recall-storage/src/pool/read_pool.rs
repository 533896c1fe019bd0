//! Pool of read-only connections, never blocked by the writer thanks to WAL.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use recall_core::config::StorageConfig;
use recall_core::RecallResult;
use rusqlite::Connection;

use super::pragmas::apply_reader_pragmas;
use crate::error::rusqlite_err;

const MAX_POOL_SIZE: usize = 8;

/// A pool of read-only SQLite connections, handed out round-robin.
pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &std::path::Path, config: &StorageConfig) -> RecallResult<Self> {
        let size = config.read_pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(rusqlite_err)?;
            apply_reader_pragmas(&conn, config)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// In-memory mode has no file to reopen read-only, so every reader is
    /// really just another handle onto the writer's shared-cache database.
    pub fn open_in_memory(uri: &str, config: &StorageConfig) -> RecallResult<Self> {
        let size = config.read_pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                uri,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_URI,
            )
            .map_err(rusqlite_err)?;
            apply_reader_pragmas(&conn, config)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> RecallResult<T>
    where
        F: FnOnce(&Connection) -> RecallResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|e| crate::error::to_storage_error(format!("read pool lock poisoned: {e}")))?;
        f(&guard)
    }
}
