//! The per-tick confidence update: a multiplicative temporal penalty, an
//! importance brake, and an exponentially-decaying access boost, applied
//! additively as a single `delta` subtracted from the current confidence.
//!
//! ```text
//! base_rate     = is_static ? R_static : R_episodic
//! temporal_mul  = age_days > temporal_penalty_age_days ? temporal_penalty_multiplier : 1.0
//! access_boost  = min(access_boost_cap, access_count * access_boost_per_access)
//!                   * exp(-recency_days / access_boost_recency_days)
//! importance_br = 1 - 0.5 * importance
//! delta         = base_rate * temporal_mul * importance_br - access_boost
//! confidence    = clamp(confidence - delta, 0, 1)
//! ```

use chrono::{DateTime, Utc};

use recall_core::config::DecayConfig;
use recall_core::memory::MemoryNode;

/// Each term of one tick's update, for diagnostics/tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayBreakdown {
    pub base_rate: f64,
    pub temporal_multiplier: f64,
    pub importance_brake: f64,
    pub access_boost: f64,
    pub delta: f64,
    pub new_confidence: f64,
}

/// Apply one decay tick to `node`'s confidence, returning the breakdown.
/// Does not mutate `node`; the caller writes `breakdown.new_confidence`
/// back (and persists it) if it chooses to.
pub fn decay_tick(node: &MemoryNode, now: DateTime<Utc>, config: &DecayConfig) -> DecayBreakdown {
    let age_days = (now - node.created_at).num_seconds() as f64 / 86_400.0;
    let recency_days = (now - node.last_accessed).num_seconds() as f64 / 86_400.0;

    let base_rate = if node.is_static { config.rate_static } else { config.rate_episodic };
    let temporal_multiplier = if age_days > config.temporal_penalty_age_days as f64 {
        config.temporal_penalty_multiplier
    } else {
        1.0
    };
    let importance_brake = 1.0 - 0.5 * node.importance.value();
    let access_boost = (node.access_count as f64 * config.access_boost_per_access)
        .min(config.access_boost_cap)
        * (-recency_days / config.access_boost_recency_days).exp();

    let delta = base_rate * temporal_multiplier * importance_brake - access_boost;
    let new_confidence = (node.confidence.value() - delta).clamp(0.0, 1.0);

    DecayBreakdown {
        base_rate,
        temporal_multiplier,
        importance_brake,
        access_boost,
        delta,
        new_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use recall_core::memory::{Confidence, Importance};

    fn node_aged(is_static: bool, importance: f64, access_count: u64, age_days: i64, recency_days: i64) -> MemoryNode {
        let now = Utc::now();
        let mut n = MemoryNode::new("m1", "content", vec![]);
        n.is_static = is_static;
        n.importance = Importance::new(importance);
        n.access_count = access_count;
        n.created_at = now - Duration::days(age_days);
        n.last_accessed = now - Duration::days(recency_days);
        n.confidence = Confidence::new(1.0);
        n
    }

    #[test]
    fn one_full_tick_applies_base_rate_even_for_a_fresh_memory() {
        // `decay_tick` computes one full tick's worth of decay regardless of
        // age; the engine (see `engine.rs`) is what scales this down when
        // real time elapsed is less than a full `I_decay` interval.
        let config = DecayConfig::default();
        let now = Utc::now();
        let mut node = MemoryNode::new("m1", "content", vec![]);
        node.created_at = now;
        node.last_accessed = now;
        node.confidence = Confidence::new(1.0);
        let result = decay_tick(&node, now, &config);
        assert!((result.delta - config.rate_episodic).abs() < 1e-9);
    }

    #[test]
    fn static_memories_decay_far_slower_than_episodic() {
        let config = DecayConfig::default();
        let static_node = node_aged(true, 0.5, 0, 10, 10);
        let episodic_node = node_aged(false, 0.5, 0, 10, 10);
        let static_result = decay_tick(&static_node, Utc::now(), &config);
        let episodic_result = decay_tick(&episodic_node, Utc::now(), &config);
        assert!(static_result.delta < episodic_result.delta);
    }

    #[test]
    fn high_importance_halves_decay_rate_at_the_limit() {
        let config = DecayConfig::default();
        let low = node_aged(false, 0.0, 0, 5, 5);
        let high = node_aged(false, 1.0, 0, 5, 5);
        let low_result = decay_tick(&low, Utc::now(), &config);
        let high_result = decay_tick(&high, Utc::now(), &config);
        assert!((high_result.delta - low_result.delta * 0.5).abs() < 1e-9);
    }

    #[test]
    fn old_memory_gets_temporal_penalty_multiplier() {
        let config = DecayConfig::default();
        let young = node_aged(false, 0.5, 0, 10, 10);
        let old = node_aged(false, 0.5, 0, 40, 40);
        let young_result = decay_tick(&young, Utc::now(), &config);
        let old_result = decay_tick(&old, Utc::now(), &config);
        assert!(old_result.delta > young_result.delta);
    }

    #[test]
    fn frequent_recent_access_reduces_or_reverses_decay() {
        let config = DecayConfig::default();
        let unaccessed = node_aged(false, 0.5, 0, 10, 10);
        let accessed = node_aged(false, 0.5, 20, 10, 0);
        let unaccessed_result = decay_tick(&unaccessed, Utc::now(), &config);
        let accessed_result = decay_tick(&accessed, Utc::now(), &config);
        assert!(accessed_result.new_confidence > unaccessed_result.new_confidence);
    }

    #[test]
    fn confidence_never_drops_below_zero() {
        let config = DecayConfig::default();
        let mut node = node_aged(false, 0.0, 0, 400, 400);
        node.confidence = Confidence::new(0.001);
        let result = decay_tick(&node, Utc::now(), &config);
        assert_eq!(result.new_confidence, 0.0);
    }
}
