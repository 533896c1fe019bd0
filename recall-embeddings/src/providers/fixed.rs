//! Fixed-vector test double: returns a precomputed vector per input text,
//! or a configurable default for anything unregistered. Used by the rest
//! of the workspace's test suites to pin embeddings to exact values
//! without depending on the hashing embedder's bucket layout.

use std::collections::HashMap;
use std::sync::Mutex;

use recall_core::traits::EmbeddingProvider;
use recall_core::RecallResult;

pub struct FixedVectorEmbedder {
    dimensions: usize,
    model_identifier: String,
    vectors: Mutex<HashMap<String, Vec<f32>>>,
    default: Vec<f32>,
}

impl FixedVectorEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            model_identifier: "recall-fixed-test-v1".to_string(),
            vectors: Mutex::new(HashMap::new()),
            default: vec![0.0; dimensions],
        }
    }

    /// Register the vector to return for an exact text match.
    pub fn register(&self, text: impl Into<String>, vector: Vec<f32>) {
        assert_eq!(vector.len(), self.dimensions, "registered vector has wrong dimensionality");
        self.vectors.lock().unwrap().insert(text.into(), vector);
    }
}

impl EmbeddingProvider for FixedVectorEmbedder {
    fn embed(&self, text: &str) -> RecallResult<Vec<f32>> {
        let vectors = self.vectors.lock().unwrap();
        Ok(vectors.get(text).cloned().unwrap_or_else(|| self.default.clone()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_identifier(&self) -> &str {
        &self.model_identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_registered_vector() {
        let e = FixedVectorEmbedder::new(3);
        e.register("hi", vec![1.0, 0.0, 0.0]);
        assert_eq!(e.embed("hi").unwrap(), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn unregistered_text_returns_default() {
        let e = FixedVectorEmbedder::new(3);
        assert_eq!(e.embed("unknown").unwrap(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn embed_batch_uses_default_trait_impl() {
        let e = FixedVectorEmbedder::new(2);
        e.register("a", vec![1.0, 1.0]);
        let out = e.embed_batch(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(out, vec![vec![1.0, 1.0], vec![0.0, 0.0]]);
    }
}
