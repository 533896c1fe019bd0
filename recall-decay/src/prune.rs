//! Whether a node is eligible for deletion by the prune pass.
//!
//! A node is eligible once its confidence has fallen below
//! `prune_threshold`, unless it is exempt: static, important enough, or
//! accessed recently enough that removing it would be premature.

use chrono::{DateTime, Utc};

use recall_core::config::DecayConfig;
use recall_core::memory::MemoryNode;

/// True if `node` should be deleted by the next prune pass.
pub fn is_prune_eligible(node: &MemoryNode, now: DateTime<Utc>, config: &DecayConfig) -> bool {
    if node.is_static {
        return false;
    }
    if node.importance.value() >= config.prune_importance_exemption {
        return false;
    }
    let recency_days = (now - node.last_accessed).num_days();
    if recency_days <= config.prune_recent_access_days {
        return false;
    }
    node.confidence.value() < config.prune_threshold
}
