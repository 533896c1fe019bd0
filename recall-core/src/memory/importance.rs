use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance score clamped to `[0.0, 1.0]`.
///
/// Supplied by the caller at add time or inferred; high importance brakes
/// decay (see `recall-decay`) and, at `>= 0.9`, forces a memory static
/// (see `recall-classifier`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Importance(f64);

impl Importance {
    /// Importance at or above this forces a memory to classify as static.
    pub const STATIC_THRESHOLD: f64 = 0.9;

    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_static_forcing(self) -> bool {
        self.0 >= Self::STATIC_THRESHOLD
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(0.5)
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Importance {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Importance> for f64 {
    fn from(i: Importance) -> Self {
        i.0
    }
}
