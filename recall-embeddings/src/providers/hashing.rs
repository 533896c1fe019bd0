//! Deterministic hashing embedder: no network, no model download, no
//! external state. Terms are hashed (FNV-1a) into fixed buckets and
//! weighted by a within-document term-frequency / length-based IDF
//! approximation, then L2-normalized. Same text always yields the same
//! vector, which makes it convenient for tests and for environments where
//! the real on-device model has not been downloaded yet.

use std::collections::HashMap;

use recall_core::traits::EmbeddingProvider;
use recall_core::RecallResult;

pub struct HashingEmbedder {
    dimensions: usize,
    model_identifier: String,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            model_identifier: "recall-hashing-v1".to_string(),
        }
    }

    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut tf: HashMap<String, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_default() += 1.0;
        }
        let total = tokens.len() as f32;

        let mut vector = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            let freq = count / total;
            let idf = 1.0 + (term.len() as f32).ln();
            let bucket = Self::hash_term(term, self.dimensions);
            vector[bucket] += freq * idf;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> RecallResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
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
    fn same_text_is_deterministic() {
        let e = HashingEmbedder::new(64);
        assert_eq!(e.embed("hello world").unwrap(), e.embed("hello world").unwrap());
    }

    #[test]
    fn output_has_configured_dimensions() {
        let e = HashingEmbedder::new(128);
        assert_eq!(e.embed("anything").unwrap().len(), 128);
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let e = HashingEmbedder::new(32);
        assert!(e.embed("").unwrap().iter().all(|x| *x == 0.0));
    }

    #[test]
    fn distinct_texts_usually_differ() {
        let e = HashingEmbedder::new(256);
        assert_ne!(e.embed("my favorite color is blue").unwrap(), e.embed("I work at Google").unwrap());
    }

    #[test]
    fn vector_is_unit_normalized_when_nonzero() {
        let e = HashingEmbedder::new(64);
        let v = e.embed("a reasonably long sentence with several distinct words").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
