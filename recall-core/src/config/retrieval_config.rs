use serde::{Deserialize, Serialize};

/// Hybrid retrieval pipeline configuration — see `recall-retrieval`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Confidence floor for a node to enter the candidate set.
    pub t_active: f64,
    /// Fused-score floor for a candidate to survive the search threshold.
    pub t_search: f64,
    /// Weight applied to the dense (embedding cosine) score.
    pub dense_weight: f64,
    /// Weight applied to the sparse (keyword overlap) score.
    pub sparse_weight: f64,
    /// Per-matched-token contribution to the sparse score, capped at 1.0.
    pub sparse_token_weight: f64,
    /// Additive boost applied when a candidate is in the user's static set.
    pub static_boost: f64,
    /// Attenuation applied to a graph-expansion neighbor's score, on top of
    /// the edge's own confidence.
    pub graph_expansion_attenuation: f64,
    /// Minimum content token length to count as a sparse-matchable token.
    pub min_token_length: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            t_active: 0.3,
            t_search: 0.3,
            dense_weight: 0.7,
            sparse_weight: 0.3,
            sparse_token_weight: 0.15,
            static_boost: 0.1,
            graph_expansion_attenuation: 0.8,
            min_token_length: 3,
        }
    }
}
