use crate::errors::RecallResult;

/// Collaborator contract for turning text into fixed-length dense vectors.
///
/// Implementations are interchangeable: a local on-device model, a remote
/// API client, or a deterministic test double all satisfy this trait.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> RecallResult<Vec<f32>>;

    /// Embed a batch of texts. Implementations may override this with a
    /// batched call to an underlying model; the default embeds one at a
    /// time.
    fn embed_batch(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Fixed dimensionality of every vector this provider produces.
    fn dimensions(&self) -> usize;

    /// Identifier recorded alongside each stored node, so re-embedding
    /// across model changes can be detected.
    fn model_identifier(&self) -> &str;
}
