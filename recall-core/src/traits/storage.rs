use crate::errors::RecallResult;
use crate::memory::{MemoryNode, RelationshipEdge};

/// Aggregate counts returned by `MemoryStorage::stats`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub mean_out_degree: f64,
}

/// Durable, transactional storage of memory nodes and their relationship
/// edges.
///
/// Writers are serialized by the caller (the engine facade); readers must
/// observe a snapshot at least as new as the most-recently-committed
/// writer.
pub trait MemoryStorage: Send + Sync {
    /// Atomic insert-or-replace; updates all secondary indices.
    fn put_node(&self, node: &MemoryNode) -> RecallResult<()>;

    /// Fetch a node by id, hydrated with its outgoing relationships.
    fn get_node(&self, id: &str) -> RecallResult<Option<MemoryNode>>;

    /// Remove a node and all incident edges atomically.
    fn delete_node(&self, id: &str) -> RecallResult<()>;

    /// Idempotent per `(from, to, type)`: last write wins on confidence.
    /// Fails if either endpoint is absent.
    fn add_edge(&self, edge: &RelationshipEdge) -> RecallResult<()>;

    /// Ordered iteration over every node, in insertion order (for
    /// reproducible tie-breaks downstream).
    fn get_all(&self) -> RecallResult<Vec<MemoryNode>>;

    /// Every node with `is_static = true` whose `container_tags` include
    /// `user:<user_id>`.
    fn get_static(&self, user_id: &str) -> RecallResult<Vec<MemoryNode>>;

    /// Every node whose `container_tags` intersects `tags`.
    fn get_by_tags(&self, tags: &[String]) -> RecallResult<Vec<MemoryNode>>;

    /// `(node_count, edge_count, mean_out_degree)`.
    fn stats(&self) -> RecallResult<StorageStats>;

    /// Remove all nodes and edges in a single transaction.
    fn clear(&self) -> RecallResult<()>;
}
