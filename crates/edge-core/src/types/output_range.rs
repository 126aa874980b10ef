//! Closed output interval declared by every factor.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputRange {
    pub min: f64,
    pub max: f64,
}

impl OutputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-bound, bound]`.
    pub const fn symmetric(bound: f64) -> Self {
        Self { min: -bound, max: bound }
    }

    /// A range is usable when both ends are finite and `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the range. Non-finite input yields 0.0.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return 0.0;
        }
        value.max(self.min).min(self.max)
    }

    /// Clamp with a warning when the value had to move.
    pub fn clamp_logged(&self, factor: &str, value: f64) -> f64 {
        let clamped = self.clamp(value);
        if clamped != value {
            warn!(
                factor,
                value,
                clamped,
                min = self.min,
                max = self.max,
                "factor output outside declared range, clamped"
            );
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds_and_non_finite() {
        let range = OutputRange::new(-2.0, 2.0);
        assert_eq!(range.clamp(5.0), 2.0);
        assert_eq!(range.clamp(-5.0), -2.0);
        assert_eq!(range.clamp(1.25), 1.25);
        assert_eq!(range.clamp(f64::NAN), 0.0);
        assert_eq!(range.clamp(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_degenerate_range_is_invalid() {
        assert!(!OutputRange::new(1.0, 1.0).is_valid());
        assert!(!OutputRange::new(2.0, -2.0).is_valid());
        assert!(!OutputRange::new(f64::NEG_INFINITY, 0.0).is_valid());
        assert!(OutputRange::symmetric(3.5).is_valid());
    }
}
