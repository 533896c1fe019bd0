use serde::{Deserialize, Serialize};

/// Consolidation subsystem configuration — see `recall-consolidation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Pairwise embedding cosine similarity threshold for clustering two
    /// nodes together.
    pub similarity_threshold: f64,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
        }
    }
}
