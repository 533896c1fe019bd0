use serde::{Deserialize, Serialize};

/// Relationship-detection thresholds and limits — see `recall-relationships`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipConfig {
    /// Minimum similarity for a `RelatedTo` edge.
    pub t_rel: f64,
    /// Minimum similarity for an `Extends` edge.
    pub t_extend: f64,
    /// Minimum similarity for an `Updates` edge.
    pub t_update: f64,
    /// Number of top-similarity candidates considered per add.
    pub n_candidates: usize,
    /// Minimum shared keyword tokens for an `Updates` classification.
    pub update_keyword_overlap: usize,
    /// Content length ratio (new / old) required for an `Extends`
    /// classification.
    pub extend_length_ratio: f64,
    /// Maximum number of edges emitted per add, ranked by confidence.
    pub max_edges_per_add: usize,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            t_rel: 0.60,
            t_extend: 0.72,
            t_update: 0.85,
            n_candidates: 10,
            update_keyword_overlap: 2,
            extend_length_ratio: 1.2,
            max_edges_per_add: 5,
        }
    }
}
