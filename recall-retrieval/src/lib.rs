//! # recall-retrieval
//!
//! The hybrid retrieval pipeline: dense cosine + sparse keyword scoring,
//! fusion, a static-fact boost, threshold/truncate, and one-hop graph
//! expansion. Pure function over a caller-supplied candidate set — this
//! crate never touches storage or the embedder; the facade in
//! `recall-api` fetches candidates, calls in here, then applies the
//! returned access-count/last-accessed side effects.

mod candidates;
mod expand;
mod pipeline;
mod score;

pub use pipeline::{search, ScoredMemory};
