//! Steps 2–5: dense cosine score, sparse keyword score, weighted fusion,
//! and the static-fact boost.

use recall_core::config::RetrievalConfig;
use recall_core::memory::MemoryNode;
use recall_core::tokenize;
use recall_relationships::cosine_similarity;

/// `dense = cosine(query_embedding, node.embedding)`. `None` (embedder
/// unavailable) scores every node `0.0`, per the sparse-only fallback.
pub fn dense_score(query_embedding: Option<&[f32]>, node: &MemoryNode) -> f64 {
    match query_embedding {
        Some(q) => cosine_similarity(q, &node.embedding),
        None => 0.0,
    }
}

/// `0.15` per distinct query token present in the node's content, capped
/// at `1.0`.
pub fn sparse_score(query_tokens: &[String], node: &MemoryNode, config: &RetrievalConfig) -> f64 {
    if query_tokens.is_empty() {
        return 0.0;
    }
    let content_tokens: std::collections::HashSet<String> =
        tokenize(&node.content, config.min_token_length).into_iter().collect();
    let matches = query_tokens.iter().filter(|t| content_tokens.contains(*t)).count();
    (matches as f64 * config.sparse_token_weight).min(1.0)
}

/// `base = dense_weight * dense + sparse_weight * sparse`, capped at `1.0`.
pub fn fuse(dense: f64, sparse: f64, config: &RetrievalConfig) -> f64 {
    (config.dense_weight * dense + config.sparse_weight * sparse).min(1.0)
}

/// Adds `static_boost` if the node is in the caller's static set, capped
/// at `1.0`.
pub fn apply_static_boost(base: f64, is_static_for_user: bool, config: &RetrievalConfig) -> f64 {
    if is_static_for_user {
        (base + config.static_boost).min(1.0)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(content: &str, embedding: Vec<f32>) -> MemoryNode {
        MemoryNode::new("m1", content, embedding)
    }

    #[test]
    fn dense_score_is_zero_without_an_embedding() {
        let n = node("hello", vec![1.0, 0.0]);
        assert_eq!(dense_score(None, &n), 0.0);
    }

    #[test]
    fn dense_score_is_cosine_similarity() {
        let n = node("hello", vec![1.0, 0.0]);
        assert!((dense_score(Some(&[1.0, 0.0]), &n) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sparse_score_caps_at_one() {
        let config = RetrievalConfig::default();
        let n = node("rust systems programming language design", vec![]);
        let tokens = vec!["rust".to_string(), "systems".to_string(), "programming".to_string(), "language".to_string(), "design".to_string(), "extra".to_string(), "more".to_string()];
        assert_eq!(sparse_score(&tokens, &n, &config), 1.0);
    }

    #[test]
    fn sparse_score_counts_only_present_tokens() {
        let config = RetrievalConfig::default();
        let n = node("rust programming", vec![]);
        let tokens = vec!["rust".to_string(), "python".to_string()];
        let score = sparse_score(&tokens, &n, &config);
        assert!((score - config.sparse_token_weight).abs() < 1e-9);
    }

    #[test]
    fn fuse_weights_dense_over_sparse_and_caps() {
        let config = RetrievalConfig::default();
        assert!((fuse(1.0, 1.0, &config) - 1.0).abs() < 1e-9);
        assert!((fuse(0.5, 0.0, &config) - 0.35).abs() < 1e-9);
    }

    #[test]
    fn static_boost_only_applies_when_flagged() {
        let config = RetrievalConfig::default();
        assert!((apply_static_boost(0.5, true, &config) - 0.6).abs() < 1e-9);
        assert!((apply_static_boost(0.5, false, &config) - 0.5).abs() < 1e-9);
        assert!((apply_static_boost(0.95, true, &config) - 1.0).abs() < 1e-9);
    }
}
