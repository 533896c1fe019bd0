use std::cmp::Ordering;

use crate::memory::MemoryNode;

/// Deterministic ordering used whenever two memories tie on score: higher
/// `confidence`, then more recent `timestamp`, then lower `id`.
///
/// Used both by `MemoryStorage::get_all` implementations (for reproducible
/// insertion-order scans) and by the retrieval engine's final sort.
pub fn compare_nodes(a: &MemoryNode, b: &MemoryNode) -> Ordering {
    b.confidence
        .value()
        .partial_cmp(&a.confidence.value())
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_confidence_sorts_first() {
        let mut a = MemoryNode::new("a", "x", vec![]);
        let mut b = MemoryNode::new("b", "y", vec![]);
        a.confidence = crate::memory::Confidence::new(0.9);
        b.confidence = crate::memory::Confidence::new(0.5);
        assert_eq!(compare_nodes(&a, &b), Ordering::Less);
    }

    #[test]
    fn ties_break_on_id() {
        let a = MemoryNode::new("a", "x", vec![]);
        let mut b = MemoryNode::new("b", "y", vec![]);
        b.timestamp = a.timestamp;
        b.confidence = a.confidence;
        assert_eq!(compare_nodes(&a, &b), Ordering::Less);
    }
}
