use serde::{Deserialize, Serialize};

/// Embedding provider configuration — see `recall-embeddings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Fixed dimensionality every embedding produced by the configured
    /// provider must have. Validated against the provider at engine
    /// initialization and against every persisted node on read.
    pub dimensions: usize,
    /// Identifier recorded alongside each stored node and in engine
    /// metadata; a mismatch on re-open is a soft warning.
    pub model_identifier: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: 256,
            model_identifier: "recall-hashing-v1".to_string(),
        }
    }
}
