//! PRAGMA configuration applied to every connection: WAL mode, NORMAL sync,
//! a configurable mmap/cache size, a busy timeout, and incremental
//! auto-vacuum.

use recall_core::config::StorageConfig;
use recall_core::RecallResult;
use rusqlite::Connection;

use crate::error::rusqlite_err;

/// Apply the full pragma set to a read-write connection.
pub fn apply_writer_pragmas(conn: &Connection, config: &StorageConfig) -> RecallResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = {mmap};
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA foreign_keys = ON;
        PRAGMA auto_vacuum = INCREMENTAL;
        ",
        mmap = config.mmap_size_bytes,
        cache = config.cache_size_kib,
        busy = config.busy_timeout_ms,
    ))
    .map_err(rusqlite_err)
}

/// Apply the pragma subset appropriate for a read-only pooled connection.
pub fn apply_reader_pragmas(conn: &Connection, config: &StorageConfig) -> RecallResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA busy_timeout = {busy};
        PRAGMA foreign_keys = ON;
        ",
        busy = config.busy_timeout_ms,
    ))
    .map_err(rusqlite_err)
}
