use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use super::importance::Importance;
use super::relationships::RelationshipEdge;
use super::source::MemorySource;

/// The universal memory node. Every persisted memory in the system is a
/// `MemoryNode`: a piece of content, its embedding, and the bookkeeping
/// fields retrieval, decay, and consolidation all read and write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryNode {
    /// Stable unique identifier, assigned at creation.
    pub id: String,
    /// Natural-language content.
    pub content: String,
    /// Dense embedding vector, fixed dimensionality `D` (set at engine init).
    pub embedding: Vec<f32>,
    /// Identifier of the embedding model that produced `embedding`.
    pub model_identifier: String,
    /// Logical event time — may be supplied by the caller, defaults to
    /// creation wall-clock.
    pub timestamp: DateTime<Utc>,
    /// Monotonic creation time.
    pub created_at: DateTime<Utc>,
    /// Updated on every retrieval that returns this node in its top-K.
    pub last_accessed: DateTime<Utc>,
    /// Non-negative access counter.
    pub access_count: u64,
    /// `[0.0, 1.0]`, starts at `1.0`, monotonically non-increasing under
    /// decay, may be raised by access/importance.
    pub confidence: Confidence,
    /// `[0.0, 1.0]`, supplied or inferred.
    pub importance: Importance,
    /// Core-fact vs. episodic.
    pub is_static: bool,
    /// `false` once another memory `Updates` this one.
    pub is_latest: bool,
    /// Enumerated origin.
    pub source: MemorySource,
    /// Ordered `"subject:value"` strings extracted at add time.
    pub entities: Vec<String>,
    /// Ordered keyword topics extracted at add time.
    pub topics: Vec<String>,
    /// Opaque user-supplied tags, e.g. `user:alice`, `topic:work`.
    pub container_tags: BTreeSet<String>,
    /// Outgoing typed edges to other memories. Normalized storage lives in
    /// the relationship table; this is a hydrated view populated by
    /// `MemoryStorage::get_node`/`get_all`.
    pub relationships: Vec<RelationshipEdge>,
}

impl MemoryNode {
    /// Construct a new node with sensible defaults for a just-created
    /// memory: full confidence, zero access count, `is_latest = true`.
    pub fn new(id: impl Into<String>, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            content: content.into(),
            embedding,
            model_identifier: String::new(),
            timestamp: now,
            created_at: now,
            last_accessed: now,
            access_count: 0,
            confidence: Confidence::default(),
            importance: Importance::default(),
            is_static: false,
            is_latest: true,
            source: MemorySource::default(),
            entities: Vec::new(),
            topics: Vec::new(),
            container_tags: BTreeSet::new(),
            relationships: Vec::new(),
        }
    }

    /// The `user:<id>` container tag, if present.
    pub fn user_id(&self) -> Option<&str> {
        self.container_tags.iter().find_map(|tag| tag.strip_prefix("user:"))
    }

    /// Whether this node belongs to the given user (invariant: every node
    /// carries `user:<owning user>`).
    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.container_tags.contains(&format!("user:{user_id}"))
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_has_full_confidence_and_is_latest() {
        let n = MemoryNode::new("m1", "hello", vec![0.0; 4]);
        assert_eq!(n.confidence.value(), 1.0);
        assert!(n.is_latest);
        assert_eq!(n.access_count, 0);
    }

    #[test]
    fn user_id_extraction() {
        let mut n = MemoryNode::new("m1", "hi", vec![]);
        n.container_tags.insert("user:alice".to_string());
        n.container_tags.insert("topic:work".to_string());
        assert_eq!(n.user_id(), Some("alice"));
        assert!(n.belongs_to("alice"));
        assert!(!n.belongs_to("bob"));
    }
}
