//! Greedy single-link clustering over embedding cosine similarity, via
//! union-find: two nodes end up in the same cluster as soon as any chain of
//! pairwise similarities above `T_consol` connects them, even if the two
//! endpoints themselves fall below threshold.

use recall_core::config::ConsolidationConfig;
use recall_core::memory::MemoryNode;
use recall_relationships::cosine_similarity;

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Groups of indices into `nodes`, one group per cluster of size >= 2.
/// Static memories are never clustered: consolidation never merges across
/// the static/dynamic boundary, and a cluster of all-static members would
/// have nothing eligible to delete anyway.
pub fn cluster_indices(nodes: &[MemoryNode], config: &ConsolidationConfig) -> Vec<Vec<usize>> {
    let eligible: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.is_static)
        .map(|(i, _)| i)
        .collect();

    let mut uf = UnionFind::new(nodes.len());
    for (pos, &i) in eligible.iter().enumerate() {
        for &j in &eligible[pos + 1..] {
            let similarity = cosine_similarity(&nodes[i].embedding, &nodes[j].embedding);
            if similarity >= config.similarity_threshold {
                uf.union(i, j);
            }
        }
    }

    let mut groups: std::collections::HashMap<usize, Vec<usize>> = std::collections::HashMap::new();
    for &i in &eligible {
        let root = uf.find(i);
        groups.entry(root).or_default().push(i);
    }
    groups.into_values().filter(|g| g.len() > 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, embedding: Vec<f32>, is_static: bool) -> MemoryNode {
        let mut n = MemoryNode::new(id, "content", embedding);
        n.is_static = is_static;
        n
    }

    #[test]
    fn near_identical_embeddings_cluster_together() {
        let config = ConsolidationConfig::default();
        let nodes = vec![
            node("a", vec![1.0, 0.0], false),
            node("b", vec![0.99, 0.14], false),
            node("c", vec![0.0, 1.0], false),
        ];
        let clusters = cluster_indices(&nodes, &config);
        assert_eq!(clusters.len(), 1);
        let mut members = clusters[0].clone();
        members.sort();
        assert_eq!(members, vec![0, 1]);
    }

    #[test]
    fn static_memories_are_never_clustered() {
        let config = ConsolidationConfig::default();
        let nodes = vec![
            node("a", vec![1.0, 0.0], true),
            node("b", vec![1.0, 0.0], true),
        ];
        assert!(cluster_indices(&nodes, &config).is_empty());
    }

    #[test]
    fn transitive_chain_merges_into_one_cluster() {
        let mut config = ConsolidationConfig::default();
        config.similarity_threshold = 0.9;
        // a~b and b~c both clear threshold, a~c alone would not.
        let nodes = vec![
            node("a", vec![1.0, 0.0, 0.0], false),
            node("b", vec![0.95, 0.31, 0.0], false),
            node("c", vec![0.8, 0.6, 0.0], false),
        ];
        let clusters = cluster_indices(&nodes, &config);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }

    #[test]
    fn dissimilar_nodes_stay_singletons() {
        let config = ConsolidationConfig::default();
        let nodes = vec![node("a", vec![1.0, 0.0], false), node("b", vec![0.0, 1.0], false)];
        assert!(cluster_indices(&nodes, &config).is_empty());
    }
}
