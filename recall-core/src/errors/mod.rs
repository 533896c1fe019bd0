pub mod retrieval_error;
pub mod storage_error;

pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// The closed set of errors surfaced at the engine facade boundary.
#[derive(Debug, thiserror::Error)]
pub enum RecallError {
    /// Facade used before `initialize`.
    #[error("engine not initialized")]
    NotInitialized,

    /// Invalid or inconsistent configuration, e.g. a dimension mismatch
    /// between the embedder and the store.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Embedder failed or timed out.
    #[error("embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// Durable store I/O failure.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    /// Requested memory id does not resolve.
    #[error("memory not found: {id}")]
    MemoryNotFound { id: String },

    /// An edge references a node that does not exist.
    #[error("dangling relationship endpoint: {id}")]
    DanglingEndpoint { id: String },

    /// Caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<RetrievalError> for RecallError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::EmbeddingUnavailable { reason } => {
                RecallError::EmbeddingUnavailable(reason)
            }
            RetrievalError::StoreUnavailable { reason } => {
                RecallError::StoreUnavailable(StorageError::Sqlite { message: reason })
            }
            RetrievalError::Cancelled => RecallError::Cancelled,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type RecallResult<T> = Result<T, RecallError>;
