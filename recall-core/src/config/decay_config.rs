use serde::{Deserialize, Serialize};

/// Decay subsystem configuration — see `recall-decay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Base decay rate per tick for static memories.
    pub rate_static: f64,
    /// Base decay rate per tick for episodic memories.
    pub rate_episodic: f64,
    /// Confidence floor below which a non-exempt node is eligible for pruning.
    pub prune_threshold: f64,
    /// Age in days beyond which the temporal penalty multiplier kicks in.
    pub temporal_penalty_age_days: i64,
    /// Multiplier applied to the base rate once a node is older than
    /// `temporal_penalty_age_days`.
    pub temporal_penalty_multiplier: f64,
    /// Interval between decay ticks, in seconds.
    pub decay_interval_secs: u64,
    /// Interval between prune passes, in seconds.
    pub prune_interval_secs: u64,
    /// Importance at or above which pruning is skipped even if confidence
    /// would otherwise qualify.
    pub prune_importance_exemption: f64,
    /// A node accessed within this many days is exempt from pruning.
    pub prune_recent_access_days: i64,
    /// Per-access contribution to the access boost, before the cap.
    pub access_boost_per_access: f64,
    /// Upper bound on the access boost term, regardless of access count.
    pub access_boost_cap: f64,
    /// Time constant (in days) of the access boost's exponential decay
    /// with staleness since last access.
    pub access_boost_recency_days: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            rate_static: 0.001,
            rate_episodic: 0.08,
            prune_threshold: 0.1,
            temporal_penalty_age_days: 30,
            temporal_penalty_multiplier: 1.5,
            decay_interval_secs: 24 * 60 * 60,
            prune_interval_secs: 7 * 24 * 60 * 60,
            prune_importance_exemption: 0.7,
            prune_recent_access_days: 7,
            access_boost_per_access: 0.02,
            access_boost_cap: 0.2,
            access_boost_recency_days: 7.0,
        }
    }
}
