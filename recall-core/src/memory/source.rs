use serde::{Deserialize, Serialize};

/// Enumerated origin of a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySource {
    /// Directly supplied by the user.
    UserInput,
    /// Extracted from a conversation transcript.
    ExtractedFromConversation,
    /// Inferred by the system from other memories.
    Inferred,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::UserInput
    }
}
