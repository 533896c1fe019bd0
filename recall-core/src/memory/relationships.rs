use serde::{Deserialize, Serialize};

/// The closed set of relationship types the retrieval layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// New memory supersedes old.
    Updates,
    /// New memory adds detail to old.
    Extends,
    /// Thematically linked.
    RelatedTo,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 3] =
        [Self::Updates, Self::Extends, Self::RelatedTo];
}

/// A directed, typed edge between two memories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: RelationshipType,
    /// Strength/confidence of the relationship, `[0.0, 1.0]`.
    pub confidence: f64,
}

impl RelationshipEdge {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relationship_type: RelationshipType,
        confidence: f64,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relationship_type,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
