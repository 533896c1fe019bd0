use serde::{Deserialize, Serialize};

/// Static/dynamic classification and dynamic-context ring buffer
/// configuration — see `recall-classifier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Importance at or above which a memory is forced static regardless of
    /// content pattern.
    pub static_importance_threshold: f64,
    /// Capacity of the per-user dynamic context ring buffer.
    pub dynamic_context_capacity: usize,
    /// Dynamic context items older than this many days with importance
    /// below `dynamic_context_prune_importance` are evicted.
    pub dynamic_context_max_age_days: i64,
    /// See `dynamic_context_max_age_days`.
    pub dynamic_context_prune_importance: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            static_importance_threshold: 0.9,
            dynamic_context_capacity: 5,
            dynamic_context_max_age_days: 7,
            dynamic_context_prune_importance: 0.6,
        }
    }
}
