use recall_core::memory::{Importance, MemorySource, MemoryNode};

/// An explicit, typed stand-in for the caller-supplied per-memory
/// metadata bag: an optional importance override and an optional source
/// override. Everything else about a memory is derived (classification,
/// entities, topics) rather than caller-specified.
#[derive(Debug, Clone, Default)]
pub struct MemoryMetadata {
    pub importance: Option<Importance>,
    pub source: Option<MemorySource>,
}

/// One scored hit from `RecallEngine::search`.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub node: MemoryNode,
    pub score: f64,
}

/// A user's static facts plus their most recent dynamic (episodic)
/// memories, as returned by `get_user_context`.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub static_memories: Vec<MemoryNode>,
    pub dynamic_context: Vec<MemoryNode>,
}
