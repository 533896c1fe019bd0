//! The bounded, cache-only per-user profile: static-memory id set plus a
//! dynamic context ring. Backed by `moka`'s sync cache for capacity-bound
//! LRU eviction and time-to-live expiry — losing an entry just means the
//! next lookup rebuilds it from the store.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;

use crate::dynamic_context::DynamicContextRing;

/// A user's derived profile. Entirely reconstructible from the store;
/// never the system of record.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: String,
    pub static_ids: BTreeSet<String>,
    pub dynamic_context: DynamicContextRing,
    pub last_refreshed: DateTime<Utc>,
}

impl UserProfile {
    fn new(user_id: &str, dynamic_capacity: usize) -> Self {
        Self {
            user_id: user_id.to_string(),
            static_ids: BTreeSet::new(),
            dynamic_context: DynamicContextRing::new(dynamic_capacity),
            last_refreshed: Utc::now(),
        }
    }
}

/// Bounded LRU of `UserProfile`s, one per active user. Capacity and TTL are
/// configuration (`ProfileCacheConfig`); default capacity 10, default TTL 1h.
pub struct ProfileCache {
    cache: Cache<String, Arc<Mutex<UserProfile>>>,
    dynamic_capacity: usize,
}

impl ProfileCache {
    pub fn new(capacity: u64, ttl_secs: u64, dynamic_capacity: usize) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(StdDuration::from_secs(ttl_secs))
            .build();
        Self { cache, dynamic_capacity }
    }

    /// Fetch the cached profile for a user, creating an empty one (no
    /// static ids, empty dynamic ring) if absent or expired.
    pub fn get_or_init(&self, user_id: &str) -> Arc<Mutex<UserProfile>> {
        let dynamic_capacity = self.dynamic_capacity;
        self.cache
            .get_with(user_id.to_string(), || Arc::new(Mutex::new(UserProfile::new(user_id, dynamic_capacity))))
    }

    /// Record that a memory id has been classified static for a user.
    pub fn mark_static(&self, user_id: &str, memory_id: &str) {
        let entry = self.get_or_init(user_id);
        entry.lock().unwrap().static_ids.insert(memory_id.to_string());
    }

    /// Drop a user's cached profile; the next `get_or_init` rebuilds it.
    pub fn invalidate(&self, user_id: &str) {
        self.cache.invalidate(user_id);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}
