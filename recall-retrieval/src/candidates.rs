//! Step 1: narrow the caller-supplied node set down to the active
//! candidate set a query is scored against.

use recall_core::config::RetrievalConfig;
use recall_core::memory::MemoryNode;

/// Keep nodes with `confidence >= t_active`, and, if `container_tags` is
/// nonempty, only those whose tag set intersects it. The caller is
/// responsible for having already filtered `nodes` down to `user_id`.
pub fn active_candidates<'a>(
    nodes: &'a [MemoryNode],
    container_tags: &[String],
    config: &RetrievalConfig,
) -> Vec<&'a MemoryNode> {
    nodes
        .iter()
        .filter(|n| n.confidence.value() >= config.t_active)
        .filter(|n| container_tags.is_empty() || n.container_tags.iter().any(|t| container_tags.contains(t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::memory::Confidence;

    fn node(id: &str, confidence: f64, tags: &[&str]) -> MemoryNode {
        let mut n = MemoryNode::new(id, "content", vec![]);
        n.confidence = Confidence::new(confidence);
        for t in tags {
            n.container_tags.insert(t.to_string());
        }
        n
    }

    #[test]
    fn drops_nodes_below_t_active() {
        let config = RetrievalConfig::default();
        let nodes = vec![node("a", 0.1, &[]), node("b", 0.5, &[])];
        let result = active_candidates(&nodes, &[], &config);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn empty_tag_filter_keeps_everything_above_threshold() {
        let config = RetrievalConfig::default();
        let nodes = vec![node("a", 0.9, &["topic:work"])];
        assert_eq!(active_candidates(&nodes, &[], &config).len(), 1);
    }

    #[test]
    fn nonempty_tag_filter_keeps_only_intersecting_nodes() {
        let config = RetrievalConfig::default();
        let nodes = vec![node("a", 0.9, &["topic:work"]), node("b", 0.9, &["topic:home"])];
        let filter = vec!["topic:work".to_string()];
        let result = active_candidates(&nodes, &filter, &config);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }
}
