//! # recall-consolidation
//!
//! The offline near-duplicate consolidation pass: a pure function from "all
//! nodes" to a plan (nodes to upsert, ids to delete). Applying the plan —
//! deleting, upserting, and transferring access to storage — is the
//! caller's job; this crate never touches storage.

mod cluster;
mod plan;

pub use cluster::cluster_indices;
pub use plan::{plan_consolidation, ConsolidationPlan};
