//! # recall-decay
//!
//! The confidence decay formula and the separate prune-eligibility check.
//! Kept as two pure functions rather than one combined pass, mirroring the
//! "compute decay, then decide archival" split a decay engine typically
//! wants: a caller may decay without pruning, or evaluate pruning against
//! an already-decayed store.

mod engine;
mod formula;
mod prune;

pub use engine::{DecayEngine, DecayOutcome};
pub use formula::{decay_tick, DecayBreakdown};
pub use prune::is_prune_eligible;
