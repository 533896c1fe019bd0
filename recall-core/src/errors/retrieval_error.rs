/// Retrieval-pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedder unavailable: {reason}")]
    EmbeddingUnavailable { reason: String },

    #[error("underlying store failed: {reason}")]
    StoreUnavailable { reason: String },

    #[error("operation cancelled")]
    Cancelled,
}
