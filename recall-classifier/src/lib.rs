//! # recall-classifier
//!
//! Decides whether a memory is static (a core fact about the user) or
//! dynamic (episodic), and maintains the bounded per-user profile cache
//! that sits on top of that decision: the static-id set and a dynamic
//! context ring buffer. The cache is a pure projection of the memory
//! graph — losing it is never a correctness bug, only a cold-start cost.

mod dynamic_context;
mod profile;
mod rules;

pub use dynamic_context::{DynamicContextItem, DynamicContextRing, DynamicCategory};
pub use profile::{ProfileCache, UserProfile};
pub use rules::{classify, extract_entity_predicates};
