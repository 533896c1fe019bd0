use std::path::PathBuf;
use std::sync::Arc;

use recall_core::config::RecallConfig;
use recall_core::traits::EmbeddingProvider;

/// Options consumed by `RecallEngine::initialize`. Constructing the
/// engine from a config plus an injected embedder collaborator — rather
/// than reading a process-wide singleton — is the whole point of the
/// handle type: no hidden global, construct once, `close` to release.
pub struct RecallEngineOptions {
    pub config: RecallConfig,
    /// `:memory:`-backed when `None` (used by tests).
    pub database_path: Option<PathBuf>,
    /// Defaults to a deterministic `HashingEmbedder` at
    /// `config.embedding.dimensions` when not supplied.
    pub embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl Default for RecallEngineOptions {
    fn default() -> Self {
        Self {
            config: RecallConfig::default(),
            database_path: None,
            embedder: None,
        }
    }
}
