//! The background decay/prune loop: a single long-lived task, spawned once
//! at `initialize`, ticking on the same scheduler as everything else. It
//! mirrors `RecallEngine::process_decay`/`prune_memories` but runs
//! unattended at `I_decay`/`I_prune` cadence rather than on demand.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::Utc;
use recall_core::config::DecayConfig;
use recall_core::memory::Confidence;
use recall_core::traits::MemoryStorage;
use recall_decay::{is_prune_eligible, DecayEngine};
use tokio::task::JoinHandle;

pub(crate) fn spawn(
    storage: Arc<dyn MemoryStorage>,
    decay_engine: Arc<StdMutex<DecayEngine>>,
    decay_config: DecayConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut decay_interval = tokio::time::interval(Duration::from_secs(decay_config.decay_interval_secs.max(1)));
        let mut prune_interval = tokio::time::interval(Duration::from_secs(decay_config.prune_interval_secs.max(1)));
        // The first tick of `tokio::time::interval` fires immediately; skip
        // it so the background loop doesn't double-apply against a manual
        // `process_decay`/`prune_memories` call made right after `initialize`.
        decay_interval.tick().await;
        prune_interval.tick().await;

        loop {
            tokio::select! {
                _ = decay_interval.tick() => {
                    run_decay_tick(&storage, &decay_engine, &decay_config);
                }
                _ = prune_interval.tick() => {
                    run_prune_pass(&storage, &decay_config);
                }
            }
        }
    })
}

fn run_decay_tick(storage: &Arc<dyn MemoryStorage>, decay_engine: &Arc<StdMutex<DecayEngine>>, config: &DecayConfig) {
    let Ok(nodes) = storage.get_all() else {
        tracing::warn!("background decay tick: store unavailable");
        return;
    };
    let now = Utc::now();
    let outcomes = decay_engine.lock().unwrap().run_tick(&nodes, now, config);
    for (node, outcome) in nodes.iter().zip(outcomes.iter()) {
        if (node.confidence.value() - outcome.new_confidence).abs() < f64::EPSILON {
            continue;
        }
        let mut updated = node.clone();
        updated.confidence = Confidence::new(outcome.new_confidence);
        if let Err(err) = storage.put_node(&updated) {
            tracing::warn!(id = %node.id, error = %err, "decay tick: failed to persist updated confidence");
        }
    }
}

fn run_prune_pass(storage: &Arc<dyn MemoryStorage>, config: &DecayConfig) {
    let Ok(nodes) = storage.get_all() else {
        tracing::warn!("background prune pass: store unavailable");
        return;
    };
    let now = Utc::now();
    for node in &nodes {
        if is_prune_eligible(node, now, config) {
            if let Err(err) = storage.delete_node(&node.id) {
                tracing::warn!(id = %node.id, error = %err, "prune pass: failed to delete node");
            }
        }
    }
}
