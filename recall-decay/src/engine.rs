//! Scheduling wrapper around [`decay_tick`]: scales one tick's delta by how
//! much of a full `decay_interval_secs` period has actually elapsed since
//! the engine last ran, so that calling `run_tick` twice with the clock
//! frozen (or barely advanced) is a near no-op rather than double-applying
//! a full tick's decay.

use chrono::{DateTime, Utc};

use recall_core::config::DecayConfig;
use recall_core::memory::MemoryNode;

use crate::formula::decay_tick;

/// Tracks the wall-clock time of the last tick so repeated or off-schedule
/// invocations scale proportionally instead of each applying a full tick.
#[derive(Debug, Default)]
pub struct DecayEngine {
    last_tick_at: Option<DateTime<Utc>>,
}

/// One node's confidence update from a `run_tick` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayOutcome {
    pub new_confidence: f64,
}

impl DecayEngine {
    pub fn new() -> Self {
        Self { last_tick_at: None }
    }

    /// Apply a fraction of one decay tick to every node in `nodes`,
    /// proportional to how much of `config.decay_interval_secs` has
    /// elapsed since the previous call. The first call after construction
    /// always applies a full tick, since there is no prior call to measure
    /// elapsed time from.
    pub fn run_tick(&mut self, nodes: &[MemoryNode], now: DateTime<Utc>, config: &DecayConfig) -> Vec<DecayOutcome> {
        let fraction = match self.last_tick_at {
            None => 1.0,
            Some(prev) => {
                let elapsed_secs = (now - prev).num_seconds().max(0) as f64;
                (elapsed_secs / config.decay_interval_secs as f64).min(1.0)
            }
        };
        self.last_tick_at = Some(now);

        nodes
            .iter()
            .map(|node| {
                let breakdown = decay_tick(node, now, config);
                let scaled_delta = breakdown.delta * fraction;
                let new_confidence = (node.confidence.value() - scaled_delta).clamp(0.0, 1.0);
                DecayOutcome { new_confidence }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::memory::Confidence;

    fn node() -> MemoryNode {
        let mut n = MemoryNode::new("m1", "content", vec![]);
        n.confidence = Confidence::new(1.0);
        n
    }

    #[test]
    fn first_tick_applies_a_full_tick() {
        let config = DecayConfig::default();
        let mut engine = DecayEngine::new();
        let now = Utc::now();
        let outcomes = engine.run_tick(&[node()], now, &config);
        assert!((1.0 - outcomes[0].new_confidence - config.rate_episodic).abs() < 1e-9);
    }

    #[test]
    fn running_again_with_zero_elapsed_time_is_a_no_op() {
        let config = DecayConfig::default();
        let mut engine = DecayEngine::new();
        let now = Utc::now();
        let first = engine.run_tick(&[node()], now, &config);
        let second_input = {
            let mut n = node();
            n.confidence = Confidence::new(first[0].new_confidence);
            n
        };
        let second = engine.run_tick(&[second_input], now, &config);
        assert!((second[0].new_confidence - first[0].new_confidence).abs() < 1e-9);
    }

    #[test]
    fn partial_interval_scales_delta_proportionally() {
        let config = DecayConfig::default();
        let mut engine = DecayEngine::new();
        let now = Utc::now();
        let _ = engine.run_tick(&[node()], now, &config);
        let half_interval_later = now + chrono::Duration::seconds(config.decay_interval_secs as i64 / 2);
        let outcomes = engine.run_tick(&[node()], half_interval_later, &config);
        let expected_delta = config.rate_episodic * 0.5;
        assert!((1.0 - outcomes[0].new_confidence - expected_delta).abs() < 1e-6);
    }
}
