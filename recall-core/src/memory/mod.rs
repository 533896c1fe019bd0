pub mod base;
pub mod confidence;
pub mod importance;
pub mod relationships;
pub mod source;

pub use base::MemoryNode;
pub use confidence::Confidence;
pub use importance::Importance;
pub use relationships::{RelationshipEdge, RelationshipType};
pub use source::MemorySource;
