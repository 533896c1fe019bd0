//! Connection pool: one write connection plus a round-robin read pool.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use recall_core::config::StorageConfig;
use recall_core::RecallResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Owns the writer connection and the read pool.
///
/// In-memory mode shares a single database between writer and readers via
/// a named shared cache (`file:<name>?mode=memory&cache=shared`), since
/// two independent `:memory:` connections would otherwise see unrelated
/// databases.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    pub fn open(path: &Path, config: &StorageConfig) -> RecallResult<Self> {
        let writer = WriteConnection::open(path, config)?;
        let readers = ReadPool::open(path, config)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory(config: &StorageConfig) -> RecallResult<Self> {
        let uri = "file:recall_in_memory?mode=memory&cache=shared";
        let writer = WriteConnection::open_in_memory(uri, config)?;
        let readers = ReadPool::open_in_memory(uri, config)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
