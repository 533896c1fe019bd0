use chrono::{DateTime, Utc};

use crate::results::MemoryMetadata;

/// One `add`/`batch_add` item.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub content: String,
    pub user_id: String,
    pub metadata: Option<MemoryMetadata>,
    pub container_tags: Option<Vec<String>>,
    /// Logical "when this conversation happened" timestamp.
    pub conversation_date: Option<DateTime<Utc>>,
    /// Logical "when the described event happened" timestamp; takes
    /// precedence over `conversation_date` as the node's `timestamp` when
    /// both are given.
    pub event_date: Option<DateTime<Utc>>,
    /// Bypasses relationship detection for bulk ingestion.
    pub skip_relationships: bool,
}

impl AddRequest {
    pub fn new(content: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}
