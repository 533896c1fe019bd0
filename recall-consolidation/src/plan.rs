//! Turns clusters into a concrete consolidation plan: which node survives
//! each cluster (merged), which ids are deleted, and how edges elsewhere in
//! the graph are retargeted away from deleted ids.

use std::collections::{HashMap, HashSet};

use recall_core::config::ConsolidationConfig;
use recall_core::memory::MemoryNode;
use recall_core::tie_break::compare_nodes;

use crate::cluster::cluster_indices;

/// The result of a consolidation pass: nodes that changed (representatives
/// with merged tags/access counts, plus any other node whose outgoing
/// edges were retargeted) and ids to delete. The caller applies both; this
/// crate never touches storage itself.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationPlan {
    pub updated_nodes: Vec<MemoryNode>,
    pub deleted_ids: Vec<String>,
}

/// Build a consolidation plan from the full node set.
///
/// For each cluster of pairwise-similar, non-static nodes: pick the
/// representative (highest confidence, then most recent timestamp, per
/// `compare_nodes`), merge the other members' `container_tags` and
/// `access_count` into it, and mark them for deletion. Any node anywhere in
/// `nodes` — including the representative itself — that holds an outgoing
/// edge targeting a deleted id has that edge retargeted to the
/// representative instead.
pub fn plan_consolidation(nodes: &[MemoryNode], config: &ConsolidationConfig) -> ConsolidationPlan {
    let clusters = cluster_indices(nodes, config);

    let mut deleted_ids: Vec<String> = Vec::new();
    let mut deleted_set: HashSet<String> = HashSet::new();
    let mut representative_for: HashMap<String, String> = HashMap::new();
    let mut merged: HashMap<String, MemoryNode> = HashMap::new();

    for group in &clusters {
        let mut ordered = group.clone();
        ordered.sort_by(|&a, &b| compare_nodes(&nodes[a], &nodes[b]));
        let rep_idx = ordered[0];
        let mut representative = nodes[rep_idx].clone();

        for &idx in &ordered[1..] {
            let member = &nodes[idx];
            representative.container_tags.extend(member.container_tags.iter().cloned());
            representative.access_count += member.access_count;
            deleted_ids.push(member.id.clone());
            deleted_set.insert(member.id.clone());
            representative_for.insert(member.id.clone(), representative.id.clone());
        }

        merged.insert(representative.id.clone(), representative);
    }

    let mut updated_nodes: HashMap<String, MemoryNode> = merged;
    for node in nodes {
        if deleted_set.contains(&node.id) {
            continue;
        }
        let needs_rewrite = node
            .relationships
            .iter()
            .any(|edge| representative_for.contains_key(&edge.target_id));
        if !needs_rewrite {
            continue;
        }
        let mut updated = updated_nodes.remove(&node.id).unwrap_or_else(|| node.clone());
        for edge in &mut updated.relationships {
            if let Some(new_target) = representative_for.get(&edge.target_id) {
                edge.target_id = new_target.clone();
            }
        }
        updated.relationships.retain(|edge| edge.target_id != updated.id);
        dedupe_edges(&mut updated.relationships);
        updated_nodes.insert(updated.id.clone(), updated);
    }

    ConsolidationPlan {
        updated_nodes: updated_nodes.into_values().collect(),
        deleted_ids,
    }
}

fn dedupe_edges(edges: &mut Vec<recall_core::memory::RelationshipEdge>) {
    edges.sort_by(|a, b| a.target_id.cmp(&b.target_id).then_with(|| format!("{:?}", a.relationship_type).cmp(&format!("{:?}", b.relationship_type))));
    edges.dedup_by(|a, b| a.target_id == b.target_id && a.relationship_type == b.relationship_type);
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::memory::{Confidence, RelationshipEdge, RelationshipType};

    fn node(id: &str, embedding: Vec<f32>, confidence: f64) -> MemoryNode {
        let mut n = MemoryNode::new(id, "content", embedding);
        n.confidence = Confidence::new(confidence);
        n
    }

    #[test]
    fn higher_confidence_node_survives_as_representative() {
        let config = ConsolidationConfig::default();
        let nodes = vec![node("a", vec![1.0, 0.0], 0.5), node("b", vec![0.99, 0.14], 0.9)];
        let plan = plan_consolidation(&nodes, &config);
        assert_eq!(plan.deleted_ids, vec!["a".to_string()]);
        let rep = plan.updated_nodes.iter().find(|n| n.id == "b").unwrap();
        assert_eq!(rep.id, "b");
    }

    #[test]
    fn tags_and_access_counts_merge_into_representative() {
        let config = ConsolidationConfig::default();
        let mut a = node("a", vec![1.0, 0.0], 0.5);
        a.container_tags.insert("topic:work".to_string());
        a.access_count = 3;
        let mut b = node("b", vec![0.99, 0.14], 0.9);
        b.container_tags.insert("topic:home".to_string());
        b.access_count = 2;
        let plan = plan_consolidation(&[a, b], &config);
        let rep = plan.updated_nodes.iter().find(|n| n.id == "b").unwrap();
        assert_eq!(rep.access_count, 5);
        assert!(rep.container_tags.contains("topic:work"));
        assert!(rep.container_tags.contains("topic:home"));
    }

    #[test]
    fn edges_into_a_deleted_node_are_retargeted_to_the_representative() {
        let config = ConsolidationConfig::default();
        let a = node("a", vec![1.0, 0.0], 0.5);
        let b = node("b", vec![0.99, 0.14], 0.9);
        let mut c = node("c", vec![0.0, 1.0], 0.4);
        c.relationships.push(RelationshipEdge::new("c", "a", RelationshipType::RelatedTo, 0.7));
        let plan = plan_consolidation(&[a, b, c], &config);
        let updated_c = plan.updated_nodes.iter().find(|n| n.id == "c").unwrap();
        assert_eq!(updated_c.relationships[0].target_id, "b");
    }

    #[test]
    fn no_clusters_yields_empty_plan() {
        let config = ConsolidationConfig::default();
        let nodes = vec![node("a", vec![1.0, 0.0], 0.5), node("b", vec![0.0, 1.0], 0.5)];
        let plan = plan_consolidation(&nodes, &config);
        assert!(plan.deleted_ids.is_empty());
        assert!(plan.updated_nodes.is_empty());
    }

    #[test]
    fn static_nodes_are_never_deleted_even_if_embeddings_match() {
        let config = ConsolidationConfig::default();
        let mut a = node("a", vec![1.0, 0.0], 0.5);
        a.is_static = true;
        let mut b = node("b", vec![1.0, 0.0], 0.9);
        b.is_static = true;
        let plan = plan_consolidation(&[a, b], &config);
        assert!(plan.deleted_ids.is_empty());
    }
}
