//! The full nine-step hybrid retrieval pipeline. Pure function: the caller
//! supplies the user's full node set, the static-id set, and an optional
//! query embedding; this returns a ranked, capped list of `(node, score)`
//! pairs. Access-count/last-accessed side effects (step 9) are the
//! caller's responsibility — they're applied to storage, which this crate
//! doesn't touch.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use recall_core::config::RetrievalConfig;
use recall_core::memory::MemoryNode;
use recall_core::tie_break::compare_nodes;
use recall_core::tokenize;

use crate::candidates::active_candidates;
use crate::expand::expand;
use crate::score::{apply_static_boost, dense_score, fuse, sparse_score};

/// One scored result. Cloned out of the candidate set so callers can hand
/// the list back to a UI/LLM prompt without holding a borrow.
#[derive(Debug, Clone)]
pub struct ScoredMemory {
    pub node: MemoryNode,
    pub score: f64,
}

/// Run the full pipeline over `nodes` (already filtered to one `user_id`
/// by the caller).
///
/// `query_embedding: None` means the embedder failed or produced nothing
/// usable; retrieval falls back to sparse-only scoring rather than
/// erroring (dense contributes `0.0` to every candidate).
pub fn search(
    query: &str,
    query_embedding: Option<&[f32]>,
    nodes: &[MemoryNode],
    static_ids: &HashSet<String>,
    container_tags: &[String],
    limit: usize,
    config: &RetrievalConfig,
) -> Vec<ScoredMemory> {
    let active = active_candidates(nodes, container_tags, config);
    let active_by_id: HashMap<&str, &MemoryNode> = active.iter().map(|n| (n.id.as_str(), *n)).collect();
    let query_tokens = tokenize(query, config.min_token_length);

    let mut scored: Vec<ScoredMemory> = active
        .iter()
        .map(|node| {
            let dense = dense_score(query_embedding, node);
            let sparse = sparse_score(&query_tokens, node, config);
            let base = fuse(dense, sparse, config);
            let base = apply_static_boost(base, static_ids.contains(&node.id), config);
            ScoredMemory { node: (*node).clone(), score: base }
        })
        .filter(|s| s.score >= config.t_search)
        .collect();

    sort_by_score_desc(&mut scored, nodes);
    scored.truncate(limit);

    let expanded = expand(&scored, &active_by_id, config);
    scored.extend(expanded);

    sort_by_score_desc(&mut scored, nodes);
    scored.truncate(limit);
    scored
}

fn sort_by_score_desc(scored: &mut [ScoredMemory], all_nodes: &[MemoryNode]) {
    let node_by_id: HashMap<&str, &MemoryNode> = all_nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match (node_by_id.get(a.node.id.as_str()), node_by_id.get(b.node.id.as_str())) {
                (Some(na), Some(nb)) => compare_nodes(na, nb),
                _ => a.node.id.cmp(&b.node.id),
            })
    });
}
