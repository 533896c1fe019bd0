//! `RecallEngine`: the public facade. Every method either reads through a
//! shared lock on `State` or additionally serializes through
//! `Collaborators::write_lock` for the duration of a multi-step mutation —
//! reads never block on writes, writes never interleave with each other.

use std::collections::HashSet;
use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use recall_classifier::{classify, extract_entity_predicates, ProfileCache};
use recall_consolidation::plan_consolidation;
use recall_core::memory::{Confidence, MemoryNode, RelationshipEdge, RelationshipType};
use recall_core::traits::{EmbeddingProvider, MemoryStorage, StorageStats};
use recall_core::{tokenize, RecallError, RecallResult};
use recall_decay::{is_prune_eligible, DecayEngine};
use recall_embeddings::HashingEmbedder;
use recall_relationships::detect_relationships;
use recall_retrieval::search as run_search;
use recall_storage::StorageEngine;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::decay_task;
use crate::options::RecallEngineOptions;
use crate::requests::AddRequest;
use crate::results::{SearchHit, UserContext};
use crate::state::{Collaborators, State};

/// Handle to a Recall memory engine. Construct with `RecallEngine::new`,
/// bring it up with `initialize`, and `close` it to release storage and
/// the background decay task. No process-wide singleton: nothing stops a
/// caller from running several independently-configured engines side by
/// side.
pub struct RecallEngine {
    state: RwLock<State>,
}

impl Default for RecallEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn require(state: &State) -> RecallResult<&Collaborators> {
    match state {
        State::Initialized(collaborators) => Ok(collaborators),
        State::Uninitialized | State::Closed => Err(RecallError::NotInitialized),
    }
}

impl RecallEngine {
    pub fn new() -> Self {
        Self { state: RwLock::new(State::Uninitialized) }
    }

    /// Bring the engine up. A no-op if already `Initialized`; safe to call
    /// again after `close`/`reset` to reopen.
    pub async fn initialize(&self, options: RecallEngineOptions) -> RecallResult<()> {
        let mut guard = self.state.write().await;
        if matches!(*guard, State::Initialized(_)) {
            return Ok(());
        }
        options.config.validate()?;

        let storage = match &options.database_path {
            Some(path) => Arc::new(StorageEngine::open(path, &options.config.storage)?),
            None => Arc::new(StorageEngine::open_in_memory(&options.config.storage)?),
        };
        let embedder: Arc<dyn EmbeddingProvider> = options
            .embedder
            .unwrap_or_else(|| Arc::new(HashingEmbedder::new(options.config.embedding.dimensions)));
        if embedder.dimensions() != options.config.embedding.dimensions {
            return Err(RecallError::ConfigurationError(format!(
                "embedder produces {}-dimensional vectors but config.embedding.dimensions is {}",
                embedder.dimensions(),
                options.config.embedding.dimensions
            )));
        }

        let profile_cache = ProfileCache::new(
            options.config.profile_cache.capacity,
            options.config.profile_cache.ttl_secs,
            options.config.classifier.dynamic_context_capacity,
        );
        let decay_engine = Arc::new(StdMutex::new(DecayEngine::new()));
        let decay_task = decay_task::spawn(
            storage.clone() as Arc<dyn MemoryStorage>,
            decay_engine.clone(),
            options.config.decay.clone(),
        );

        *guard = State::Initialized(Box::new(Collaborators {
            config: options.config,
            storage,
            embedder,
            profile_cache,
            write_lock: tokio::sync::Mutex::new(()),
            decay_engine,
            decay_task: StdMutex::new(Some(decay_task)),
        }));
        Ok(())
    }

    /// Embed, classify, detect relationships against the caller's existing
    /// memories, and persist. Relationship detection is skipped when the
    /// request asks for it (bulk ingestion) or fails closed with no edges
    /// if the store read errors.
    pub async fn add(&self, request: AddRequest) -> RecallResult<MemoryNode> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;

        let embedding = collab.embedder.embed(&request.content)?;
        let mut node = MemoryNode::new(Uuid::new_v4().to_string(), request.content.clone(), embedding);
        node.model_identifier = collab.embedder.model_identifier().to_string();

        if let Some(event_date) = request.event_date {
            node.timestamp = event_date;
        } else if let Some(conversation_date) = request.conversation_date {
            node.timestamp = conversation_date;
        }

        node.container_tags.insert(format!("user:{}", request.user_id));
        if let Some(tags) = &request.container_tags {
            node.container_tags.extend(tags.iter().cloned());
        }
        if let Some(metadata) = &request.metadata {
            if let Some(importance) = metadata.importance {
                node.importance = importance;
            }
            if let Some(source) = metadata.source {
                node.source = source;
            }
        }

        node.entities = extract_entity_predicates(&request.content);
        node.topics = tokenize(&request.content, collab.config.retrieval.min_token_length);
        node.is_static = classify(&request.content, node.importance, &node.entities, &collab.config.classifier);

        if !request.skip_relationships {
            let candidates = collab.storage.get_by_tags(&[format!("user:{}", request.user_id)])?;
            node.relationships = detect_relationships(&node, &candidates, &collab.config.relationships);
        }

        collab.storage.put_node(&node)?;
        for edge in &node.relationships {
            collab.storage.add_edge(edge)?;
            if edge.relationship_type == RelationshipType::Updates {
                if let Some(mut superseded) = collab.storage.get_node(&edge.target_id)? {
                    superseded.is_latest = false;
                    collab.storage.put_node(&superseded)?;
                }
            }
        }

        if node.is_static {
            collab.profile_cache.mark_static(&request.user_id, &node.id);
        } else {
            let profile = collab.profile_cache.get_or_init(&request.user_id);
            profile
                .lock()
                .unwrap()
                .dynamic_context
                .auto_extract(&node.id, &node.content, node.importance, node.timestamp);
        }

        Ok(node)
    }

    pub async fn batch_add(&self, requests: Vec<AddRequest>) -> RecallResult<Vec<MemoryNode>> {
        let mut added = Vec::with_capacity(requests.len());
        for request in requests {
            added.push(self.add(request).await?);
        }
        Ok(added)
    }

    /// Run the hybrid retrieval pipeline over the caller's memories and
    /// apply the winning candidates' access-count/last-accessed side
    /// effects. An embedder failure degrades to sparse-only scoring rather
    /// than erroring the whole search.
    pub async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
        container_tags: Option<Vec<String>>,
    ) -> RecallResult<Vec<SearchHit>> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;

        let nodes = collab.storage.get_by_tags(&[format!("user:{user_id}")])?;
        let query_embedding = collab.embedder.embed(query).ok();
        let static_ids: HashSet<String> =
            nodes.iter().filter(|n| n.is_static).map(|n| n.id.clone()).collect();
        let tags = container_tags.unwrap_or_default();
        let hits = run_search(
            query,
            query_embedding.as_deref(),
            &nodes,
            &static_ids,
            &tags,
            limit,
            &collab.config.retrieval,
        );

        let _permit = collab.write_lock.lock().await;
        let now = Utc::now();
        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let mut updated = hit.node;
            updated.access_count += 1;
            updated.last_accessed = now;
            collab.storage.put_node(&updated)?;
            results.push(SearchHit { score: hit.score, node: updated });
        }
        Ok(results)
    }

    /// Supersede a memory: a new node carrying an explicit `Updates` edge
    /// back to the old one, which is marked `is_latest = false` rather
    /// than deleted.
    pub async fn update(&self, memory_id: &str, new_content: impl Into<String>) -> RecallResult<MemoryNode> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;

        let mut old = collab
            .storage
            .get_node(memory_id)?
            .ok_or_else(|| RecallError::MemoryNotFound { id: memory_id.to_string() })?;

        let content = new_content.into();
        let embedding = collab.embedder.embed(&content)?;
        let mut node = MemoryNode::new(Uuid::new_v4().to_string(), content.clone(), embedding);
        node.model_identifier = collab.embedder.model_identifier().to_string();
        node.container_tags = old.container_tags.clone();
        node.importance = old.importance;
        node.entities = extract_entity_predicates(&content);
        node.topics = tokenize(&content, collab.config.retrieval.min_token_length);
        node.is_static = classify(&content, node.importance, &node.entities, &collab.config.classifier);
        node.relationships
            .push(RelationshipEdge::new(node.id.clone(), old.id.clone(), RelationshipType::Updates, 1.0));

        collab.storage.put_node(&node)?;
        for edge in &node.relationships {
            collab.storage.add_edge(edge)?;
        }

        old.is_latest = false;
        collab.storage.put_node(&old)?;

        if node.is_static {
            if let Some(user_id) = node.user_id() {
                collab.profile_cache.mark_static(user_id, &node.id);
            }
        }

        Ok(node)
    }

    /// Soft delete: confidence drops to `0.0` rather than the row being
    /// removed, so incident edges and history survive.
    pub async fn delete(&self, memory_id: &str) -> RecallResult<()> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;

        let mut node = collab
            .storage
            .get_node(memory_id)?
            .ok_or_else(|| RecallError::MemoryNotFound { id: memory_id.to_string() })?;
        node.confidence = Confidence::new(0.0);
        collab.storage.put_node(&node)
    }

    /// Hard delete: the node and its incident edges are gone for good.
    pub async fn batch_delete(&self, ids: &[String]) -> RecallResult<()> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;

        for id in ids {
            collab.storage.delete_node(id)?;
        }
        Ok(())
    }

    /// Cluster near-duplicate memories for one user and apply the
    /// resulting plan: upsert survivors (with merged tags/access counts
    /// and retargeted edges) before deleting the losers, so the cascading
    /// foreign keys clean up only genuinely stale edge rows.
    pub async fn consolidate_memories(&self, user_id: &str) -> RecallResult<usize> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;

        let nodes = collab.storage.get_by_tags(&[format!("user:{user_id}")])?;
        let plan = plan_consolidation(&nodes, &collab.config.consolidation);

        for node in &plan.updated_nodes {
            collab.storage.put_node(node)?;
        }
        for node in &plan.updated_nodes {
            for edge in &node.relationships {
                collab.storage.add_edge(edge)?;
            }
        }
        for id in &plan.deleted_ids {
            collab.storage.delete_node(id)?;
        }
        if !plan.deleted_ids.is_empty() {
            collab.profile_cache.invalidate(user_id);
        }

        Ok(plan.deleted_ids.len())
    }

    /// Manually trigger one decay tick across every stored memory, on the
    /// same `DecayEngine` schedule the background task uses.
    pub async fn process_decay(&self) -> RecallResult<usize> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;

        let nodes = collab.storage.get_all()?;
        let now = Utc::now();
        let outcomes = collab.decay_engine.lock().unwrap().run_tick(&nodes, now, &collab.config.decay);

        let mut changed = 0;
        for (node, outcome) in nodes.iter().zip(outcomes.iter()) {
            if (node.confidence.value() - outcome.new_confidence).abs() < f64::EPSILON {
                continue;
            }
            let mut updated = node.clone();
            updated.confidence = Confidence::new(outcome.new_confidence);
            collab.storage.put_node(&updated)?;
            changed += 1;
        }
        Ok(changed)
    }

    /// Manually trigger one prune pass, optionally overriding the
    /// configured confidence floor.
    pub async fn prune_memories(&self, threshold: Option<f64>) -> RecallResult<usize> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;

        let mut config = collab.config.decay.clone();
        if let Some(threshold) = threshold {
            config.prune_threshold = threshold;
        }
        let nodes = collab.storage.get_all()?;
        let now = Utc::now();
        let mut pruned = 0;
        for node in &nodes {
            if is_prune_eligible(node, now, &config) {
                collab.storage.delete_node(&node.id)?;
                pruned += 1;
            }
        }
        Ok(pruned)
    }

    /// A user's static facts plus their most recent non-static memories,
    /// derived straight from storage rather than the (possibly cold or
    /// evicted) profile cache, so the result is independent of cache
    /// warmth.
    pub async fn get_user_context(&self, user_id: &str, max_dynamic: usize) -> RecallResult<UserContext> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;

        let static_memories = collab.storage.get_static(user_id)?;
        let mut dynamic_context: Vec<MemoryNode> = collab
            .storage
            .get_by_tags(&[format!("user:{user_id}")])?
            .into_iter()
            .filter(|n| !n.is_static)
            .collect();
        dynamic_context.sort_by(recall_core::compare_nodes);
        dynamic_context.truncate(max_dynamic);

        Ok(UserContext { static_memories, dynamic_context })
    }

    pub async fn get_stats(&self) -> RecallResult<StorageStats> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        collab.storage.stats()
    }

    pub async fn clear_all(&self) -> RecallResult<()> {
        let guard = self.state.read().await;
        let collab = require(&guard)?;
        let _permit = collab.write_lock.lock().await;
        collab.storage.clear()
    }

    /// Release storage and abort the background decay task, returning the
    /// engine to `Closed`. `initialize` may be called again afterward.
    pub async fn close(&self) -> RecallResult<()> {
        let mut guard = self.state.write().await;
        *guard = State::Closed;
        Ok(())
    }

    /// Like `close`, but leaves the engine in `Uninitialized` rather than
    /// `Closed` so it reads as never-having-run rather than shut down.
    pub async fn reset(&self) -> RecallResult<()> {
        let mut guard = self.state.write().await;
        *guard = State::Uninitialized;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::AddRequest;
    use crate::results::MemoryMetadata;
    use recall_core::memory::Importance;

    async fn engine() -> RecallEngine {
        let engine = RecallEngine::new();
        engine.initialize(RecallEngineOptions::default()).await.unwrap();
        engine
    }

    #[tokio::test]
    async fn uninitialized_engine_rejects_operations() {
        let engine = RecallEngine::new();
        let err = engine.get_stats().await.unwrap_err();
        assert!(matches!(err, RecallError::NotInitialized));
    }

    #[tokio::test]
    async fn add_then_search_finds_the_memory() {
        let engine = engine().await;
        engine.add(AddRequest::new("I love hiking in the mountains", "alice")).await.unwrap();
        let hits = engine.search("hiking mountains", "alice", 10, None).await.unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].node.access_count, 1);
    }

    #[tokio::test]
    async fn declarative_fact_is_classified_static() {
        let engine = engine().await;
        let node = engine.add(AddRequest::new("My name is Alice", "alice")).await.unwrap();
        assert!(node.is_static);
        let ctx = engine.get_user_context("alice", 5).await.unwrap();
        assert_eq!(ctx.static_memories.len(), 1);
    }

    #[tokio::test]
    async fn high_importance_metadata_forces_static() {
        let engine = engine().await;
        let mut request = AddRequest::new("a throwaway note", "alice");
        request.metadata = Some(MemoryMetadata { importance: Some(Importance::new(0.95)), source: None });
        let node = engine.add(request).await.unwrap();
        assert!(node.is_static);
    }

    #[tokio::test]
    async fn add_detected_update_edge_marks_the_superseded_node_stale() {
        use recall_embeddings::FixedVectorEmbedder;

        let embedder = Arc::new(FixedVectorEmbedder::new(3));
        embedder.register("my favorite color is blue", vec![1.0, 0.0, 0.0]);
        embedder.register("my favorite color is green", vec![0.99, 0.01, 0.0]);
        let engine = RecallEngine::new();
        engine
            .initialize(RecallEngineOptions { embedder: Some(embedder), ..RecallEngineOptions::default() })
            .await
            .unwrap();

        let original = engine.add(AddRequest::new("my favorite color is blue", "alice")).await.unwrap();
        assert!(original.is_latest);
        let updated = engine.add(AddRequest::new("my favorite color is green", "alice")).await.unwrap();
        assert_eq!(updated.relationships[0].relationship_type, RelationshipType::Updates);
        assert_eq!(updated.relationships[0].target_id, original.id);

        let refetched_original = engine.get_user_context("alice", 10).await.unwrap();
        let original_node = refetched_original
            .dynamic_context
            .iter()
            .chain(refetched_original.static_memories.iter())
            .find(|n| n.id == original.id)
            .expect("original node still present");
        assert!(!original_node.is_latest);
    }

    #[tokio::test]
    async fn update_supersedes_and_links_back() {
        let engine = engine().await;
        let original = engine.add(AddRequest::new("I work at Acme", "alice")).await.unwrap();
        let updated = engine.update(&original.id, "I work at Initech").await.unwrap();
        assert_eq!(updated.relationships[0].target_id, original.id);
        assert_eq!(updated.relationships[0].relationship_type, RelationshipType::Updates);
        let old = engine.get_stats().await.unwrap();
        assert_eq!(old.node_count, 2);
    }

    #[tokio::test]
    async fn delete_is_soft_and_batch_delete_is_hard() {
        let engine = engine().await;
        let node = engine.add(AddRequest::new("ephemeral note", "alice")).await.unwrap();
        engine.delete(&node.id).await.unwrap();
        let stats = engine.get_stats().await.unwrap();
        assert_eq!(stats.node_count, 1);

        engine.batch_delete(&[node.id.clone()]).await.unwrap();
        let stats = engine.get_stats().await.unwrap();
        assert_eq!(stats.node_count, 0);
    }

    #[tokio::test]
    async fn process_decay_twice_in_a_row_is_nearly_idempotent() {
        let engine = engine().await;
        engine.add(AddRequest::new("a passing episodic thought", "alice")).await.unwrap();
        let first = engine.process_decay().await.unwrap();
        let second = engine.process_decay().await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn consolidate_merges_near_duplicates() {
        let engine = engine().await;
        engine.add(AddRequest::new("I really enjoy long distance running", "alice")).await.unwrap();
        engine.add(AddRequest::new("I really enjoy long distance running", "alice")).await.unwrap();
        let merged = engine.consolidate_memories("alice").await.unwrap();
        assert_eq!(merged, 1);
        let stats = engine.get_stats().await.unwrap();
        assert_eq!(stats.node_count, 1);
    }

    #[tokio::test]
    async fn close_then_reinitialize_reopens_the_engine() {
        let engine = engine().await;
        engine.add(AddRequest::new("anything", "alice")).await.unwrap();
        engine.close().await.unwrap();
        assert!(matches!(engine.get_stats().await.unwrap_err(), RecallError::NotInitialized));
        engine.initialize(RecallEngineOptions::default()).await.unwrap();
        let stats = engine.get_stats().await.unwrap();
        assert_eq!(stats.node_count, 0);
    }
}
