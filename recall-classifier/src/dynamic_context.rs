//! The dynamic context "RAM layer": a fixed-capacity per-user ring of
//! recent episodic observations, each tagged with a category. Purely a
//! projection over dynamic memories — rebuilt from the graph, never the
//! source of truth.

use chrono::{DateTime, Utc};
use recall_core::memory::Importance;

/// Closed set of dynamic-context categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicCategory {
    CurrentProject,
    RecentChallenge,
    OngoingGoal,
    RecentMood,
    ActiveInterest,
    TemporaryFocus,
}

impl DynamicCategory {
    /// Cue phrases that trigger auto-extraction into this category, checked
    /// in declaration order (first match wins).
    const CUES: &'static [(&'static str, DynamicCategory)] = &[
        ("working on", DynamicCategory::CurrentProject),
        ("struggling with", DynamicCategory::RecentChallenge),
        ("trying to", DynamicCategory::OngoingGoal),
        ("my goal is", DynamicCategory::OngoingGoal),
        ("feeling", DynamicCategory::RecentMood),
        ("interested in", DynamicCategory::ActiveInterest),
        ("focused on", DynamicCategory::TemporaryFocus),
        ("focusing on", DynamicCategory::TemporaryFocus),
    ];

    /// Scan content for a category cue phrase.
    pub fn from_cue(content: &str) -> Option<Self> {
        let lower = content.to_lowercase();
        Self::CUES.iter().find(|(cue, _)| lower.contains(cue)).map(|(_, cat)| *cat)
    }
}

/// One entry in a user's dynamic context ring.
#[derive(Debug, Clone)]
pub struct DynamicContextItem {
    pub memory_id: String,
    pub category: DynamicCategory,
    pub content: String,
    pub importance: Importance,
    pub created_at: DateTime<Utc>,
}

impl DynamicContextItem {
    fn eviction_score(&self, now: DateTime<Utc>) -> f64 {
        let age_days = (now - self.created_at).num_seconds() as f64 / 86_400.0;
        self.importance.value() * (-age_days / 7.0).exp()
    }
}

/// Fixed-capacity ring buffer of dynamic context items for one user.
#[derive(Debug, Clone, Default)]
pub struct DynamicContextRing {
    capacity: usize,
    items: Vec<DynamicContextItem>,
}

impl DynamicContextRing {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), items: Vec::new() }
    }

    pub fn items(&self) -> &[DynamicContextItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert an item, evicting the lowest age-weighted-importance entry if
    /// already at capacity.
    pub fn push(&mut self, item: DynamicContextItem, now: DateTime<Utc>) {
        if self.items.len() >= self.capacity {
            if let Some((idx, _)) = self
                .items
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    a.eviction_score(now).partial_cmp(&b.eviction_score(now)).unwrap_or(std::cmp::Ordering::Equal)
                })
            {
                self.items.remove(idx);
            }
        }
        self.items.push(item);
    }

    /// Remove items older than `max_age_days` whose importance is below
    /// `prune_importance`.
    pub fn prune(&mut self, now: DateTime<Utc>, max_age_days: i64, prune_importance: f64) {
        self.items.retain(|item| {
            let age_days = (now - item.created_at).num_days();
            !(age_days > max_age_days && item.importance.value() < prune_importance)
        });
    }

    /// Try to build and insert a context item from a dynamic memory's
    /// content via cue-phrase matching. No-op if no cue matches.
    pub fn auto_extract(
        &mut self,
        memory_id: impl Into<String>,
        content: &str,
        importance: Importance,
        created_at: DateTime<Utc>,
    ) {
        if let Some(category) = DynamicCategory::from_cue(content) {
            self.push(
                DynamicContextItem {
                    memory_id: memory_id.into(),
                    category,
                    content: content.to_string(),
                    importance,
                    created_at,
                },
                created_at,
            );
        }
    }
}
