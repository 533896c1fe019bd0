/// Storage-layer errors for the SQLite-backed memory store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("connection pool exhausted: {active_connections} active connections")]
    PoolExhausted { active_connections: usize },

    #[error("memory {id} not found")]
    NotFound { id: String },

    #[error("edge references nonexistent node {id}")]
    DanglingEndpoint { id: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
