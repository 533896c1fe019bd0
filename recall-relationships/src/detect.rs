use recall_core::config::RelationshipConfig;
use recall_core::memory::{MemoryNode, RelationshipEdge, RelationshipType};
use recall_core::tokenize;

use crate::similarity::cosine_similarity;

/// Detect how a new memory relates to a set of existing candidate memories.
///
/// Pure function: no I/O. The caller (the engine facade) is responsible for
/// fetching `candidates` from storage and for honoring the `skip_relationships`
/// bulk-ingestion bypass by simply not calling this at all.
///
/// 1. Rank `candidates` by embedding cosine similarity to `new_memory`.
/// 2. Keep the top `config.n_candidates`.
/// 3. Classify each survivor as `Updates` / `Extends` / `RelatedTo` / none.
/// 4. Keep at most `config.max_edges_per_add`, highest confidence first.
pub fn detect_relationships(
    new_memory: &MemoryNode,
    candidates: &[MemoryNode],
    config: &RelationshipConfig,
) -> Vec<RelationshipEdge> {
    let mut ranked: Vec<(&MemoryNode, f64)> = candidates
        .iter()
        .filter(|c| c.id != new_memory.id)
        .map(|c| (c, cosine_similarity(&new_memory.embedding, &c.embedding)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(config.n_candidates);

    let mut edges: Vec<RelationshipEdge> = ranked
        .into_iter()
        .filter_map(|(candidate, similarity)| {
            classify(new_memory, candidate, similarity, config)
        })
        .collect();

    keep_single_best_update(&mut edges);

    edges.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal));
    edges.truncate(config.max_edges_per_add);
    edges
}

/// A node may carry at most one outgoing `Updates` edge. When classification
/// emits more than one (several candidates each independently clear
/// `T_update` with keyword overlap), drop every `Updates` edge but the
/// highest-confidence one.
fn keep_single_best_update(edges: &mut Vec<RelationshipEdge>) {
    let best_update_idx = edges
        .iter()
        .enumerate()
        .filter(|(_, e)| e.relationship_type == RelationshipType::Updates)
        .max_by(|(_, a), (_, b)| a.1.confidence.partial_cmp(&b.1.confidence).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, _)| idx);

    let Some(best_idx) = best_update_idx else { return };
    let mut next_idx = 0;
    edges.retain(|e| {
        let idx = next_idx;
        next_idx += 1;
        e.relationship_type != RelationshipType::Updates || idx == best_idx
    });
}

fn classify(
    new_memory: &MemoryNode,
    candidate: &MemoryNode,
    similarity: f64,
    config: &RelationshipConfig,
) -> Option<RelationshipEdge> {
    if similarity >= config.t_update && keyword_overlap(new_memory, candidate, config) {
        return Some(RelationshipEdge::new(
            new_memory.id.clone(),
            candidate.id.clone(),
            RelationshipType::Updates,
            similarity,
        ));
    }
    if similarity >= config.t_extend && is_proper_superset_length(new_memory, candidate, config) {
        return Some(RelationshipEdge::new(
            new_memory.id.clone(),
            candidate.id.clone(),
            RelationshipType::Extends,
            similarity,
        ));
    }
    if similarity >= config.t_rel {
        return Some(RelationshipEdge::new(
            new_memory.id.clone(),
            candidate.id.clone(),
            RelationshipType::RelatedTo,
            similarity,
        ));
    }
    None
}

fn keyword_overlap(new_memory: &MemoryNode, candidate: &MemoryNode, config: &RelationshipConfig) -> bool {
    let a: std::collections::HashSet<String> = tokenize(&new_memory.content, 2).into_iter().collect();
    let b: std::collections::HashSet<String> = tokenize(&candidate.content, 2).into_iter().collect();
    a.intersection(&b).count() >= config.update_keyword_overlap
}

fn is_proper_superset_length(new_memory: &MemoryNode, candidate: &MemoryNode, config: &RelationshipConfig) -> bool {
    new_memory.content.len() as f64 > candidate.content.len() as f64 * config.extend_length_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, content: &str, embedding: Vec<f32>) -> MemoryNode {
        MemoryNode::new(id, content, embedding)
    }

    #[test]
    fn high_similarity_and_overlap_yields_updates() {
        let config = RelationshipConfig::default();
        let old = node("old", "my favorite color is blue", vec![1.0, 0.0, 0.0]);
        let new = node("new", "my favorite color is green", vec![0.99, 0.01, 0.0]);
        let edges = detect_relationships(&new, &[old], &config);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].relationship_type, RelationshipType::Updates);
        assert_eq!(edges[0].target_id, "old");
    }

    #[test]
    fn high_similarity_longer_content_yields_extends() {
        let config = RelationshipConfig::default();
        let old = node("old", "I work at Google", vec![0.8, 0.6, 0.0]);
        let new = node(
            "new",
            "I work at Google as a Product Manager in the Cloud division",
            vec![0.78, 0.63, 0.0],
        );
        let edges = detect_relationships(&new, &[old], &config);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].relationship_type, RelationshipType::Extends);
    }

    #[test]
    fn moderate_similarity_yields_related_to() {
        let config = RelationshipConfig::default();
        let old = node("old", "completely unrelated words here", vec![1.0, 0.0, 0.0]);
        let new = node("new", "some other distinct phrase entirely", vec![0.65, 0.76, 0.0]);
        let edges = detect_relationships(&new, &[old], &config);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].relationship_type, RelationshipType::RelatedTo);
    }

    #[test]
    fn low_similarity_yields_no_edge() {
        let config = RelationshipConfig::default();
        let old = node("old", "a", vec![1.0, 0.0]);
        let new = node("new", "b", vec![0.0, 1.0]);
        assert!(detect_relationships(&new, &[old], &config).is_empty());
    }

    #[test]
    fn caps_candidates_at_n_candidates() {
        let mut config = RelationshipConfig::default();
        config.n_candidates = 2;
        config.t_rel = 0.0;
        let new = node("new", "query text here", vec![1.0, 0.0]);
        let candidates: Vec<MemoryNode> = (0..10)
            .map(|i| node(&format!("c{i}"), "other words entirely different", vec![1.0, 0.0]))
            .collect();
        let edges = detect_relationships(&new, &candidates, &config);
        assert!(edges.len() <= 2);
    }

    #[test]
    fn caps_emitted_edges_at_max_edges_per_add() {
        let mut config = RelationshipConfig::default();
        config.n_candidates = 20;
        config.t_rel = 0.0;
        config.max_edges_per_add = 5;
        let new = node("new", "query text here", vec![1.0, 0.0]);
        let candidates: Vec<MemoryNode> = (0..20)
            .map(|i| node(&format!("c{i}"), "other words entirely different", vec![1.0, 0.0]))
            .collect();
        let edges = detect_relationships(&new, &candidates, &config);
        assert_eq!(edges.len(), 5);
    }

    #[test]
    fn at_most_one_updates_edge_even_with_several_near_duplicate_candidates() {
        let config = RelationshipConfig::default();
        let new = node("new", "my favorite color is green", vec![0.99, 0.01, 0.0]);
        let candidates = vec![
            node("old1", "my favorite color is blue", vec![1.0, 0.0, 0.0]),
            node("old2", "my favorite color is red", vec![0.98, 0.02, 0.0]),
        ];
        let edges = detect_relationships(&new, &candidates, &config);
        assert_eq!(edges.iter().filter(|e| e.relationship_type == RelationshipType::Updates).count(), 1);
    }

    #[test]
    fn excludes_self_from_candidates() {
        let config = RelationshipConfig::default();
        let new = node("same-id", "hello", vec![1.0, 0.0]);
        let same_id_candidate = node("same-id", "hello", vec![1.0, 0.0]);
        assert!(detect_relationships(&new, &[same_id_candidate], &config).is_empty());
    }
}
