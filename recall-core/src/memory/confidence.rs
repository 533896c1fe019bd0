use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Confidence score clamped to `[0.0, 1.0]`.
///
/// Represents how much the system still "believes in" a memory after decay.
/// Starts at `1.0` on creation and is monotonically non-increasing under
/// decay, though access/importance signals may raise it back up.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a new `Confidence`, clamping to `[0.0, 1.0]`.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw `f64` value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl Add for Confidence {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for Confidence {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul<f64> for Confidence {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_above_one() {
        assert_eq!(Confidence::new(1.5).value(), 1.0);
    }

    #[test]
    fn clamps_below_zero() {
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
    }

    #[test]
    fn default_is_full_confidence() {
        assert_eq!(Confidence::default().value(), 1.0);
    }

    #[test]
    fn arithmetic_stays_clamped() {
        let c = Confidence::new(0.9) + Confidence::new(0.5);
        assert_eq!(c.value(), 1.0);
        let c = Confidence::new(0.1) - Confidence::new(0.5);
        assert_eq!(c.value(), 0.0);
    }
}
