use serde::{Deserialize, Serialize};

/// Per-user profile cache configuration — see `recall-classifier::profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileCacheConfig {
    /// Maximum number of user profiles held in the cache at once.
    pub capacity: u64,
    /// Time-to-live for a cached profile entry, in seconds.
    pub ttl_secs: u64,
}

impl Default for ProfileCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            ttl_secs: 60 * 60,
        }
    }
}
