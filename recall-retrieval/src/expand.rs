//! Step 7: one-hop graph expansion. Surviving nodes pull in their outgoing
//! neighbors (if those neighbors are themselves in the active candidate
//! set and not already among the survivors), at an attenuated score.

use std::collections::HashMap;

use recall_core::config::RetrievalConfig;
use recall_core::memory::MemoryNode;

use crate::pipeline::ScoredMemory;

/// `survivors` is the threshold-and-truncated result of step 6; `active`
/// indexes the full active candidate set by id so expansion can check
/// membership and fetch the neighbor node.
pub fn expand<'a>(
    survivors: &[ScoredMemory],
    active: &HashMap<&str, &'a MemoryNode>,
    config: &RetrievalConfig,
) -> Vec<ScoredMemory> {
    let already_included: std::collections::HashSet<&str> =
        survivors.iter().map(|s| s.node.id.as_str()).collect();

    let mut expanded = Vec::new();
    let mut seen_new: std::collections::HashSet<String> = std::collections::HashSet::new();

    for survivor in survivors {
        for edge in &survivor.node.relationships {
            if already_included.contains(edge.target_id.as_str()) {
                continue;
            }
            if seen_new.contains(&edge.target_id) {
                continue;
            }
            let Some(&target) = active.get(edge.target_id.as_str()) else {
                continue;
            };
            let score = (survivor.score * edge.confidence * config.graph_expansion_attenuation).min(1.0);
            expanded.push(ScoredMemory { node: target.clone(), score });
            seen_new.insert(edge.target_id.clone());
        }
    }
    expanded
}
