use serde::{Deserialize, Serialize};

/// SQLite storage engine configuration — see `recall-storage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Filesystem path to the database file. `:memory:` opens an
    /// in-memory database (used by tests).
    pub database_path: String,
    /// Number of pooled read-only connections.
    pub read_pool_size: usize,
    /// `busy_timeout` pragma, in milliseconds.
    pub busy_timeout_ms: u64,
    /// `mmap_size` pragma, in bytes.
    pub mmap_size_bytes: i64,
    /// `cache_size` pragma, in pages (negative selects a size in KiB).
    pub cache_size_kib: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "recall.db".to_string(),
            read_pool_size: 4,
            busy_timeout_ms: 5_000,
            mmap_size_bytes: 256 * 1024 * 1024,
            cache_size_kib: -8_000,
        }
    }
}
