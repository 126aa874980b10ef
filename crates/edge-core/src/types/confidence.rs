//! Ordered confidence levels with their numeric weight table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIDENCE_HIGH_MAGNITUDE, CONFIDENCE_LOW_MAGNITUDE, CONFIDENCE_MEDIUM_MAGNITUDE,
};

/// How much a factor trusts its own output.
///
/// Variants are declared in ascending order so the derived `Ord` matches
/// the numeric table: `None < Low < Medium < High < VeryHigh`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorConfidence {
    #[default]
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl FactorConfidence {
    pub const ALL: [FactorConfidence; 5] = [
        Self::None,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Numeric weight used when scaling a factor's dynamic weight.
    pub fn value(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Low => 0.25,
            Self::Medium => 0.5,
            Self::High => 0.75,
            Self::VeryHigh => 0.9,
        }
    }

    /// Default magnitude mapping: |v| ≥ 3.0 → HIGH, ≥ 1.5 → MEDIUM,
    /// ≥ 0.5 → LOW, else NONE.
    pub fn from_magnitude(value: f64) -> Self {
        let magnitude = value.abs();
        if magnitude >= CONFIDENCE_HIGH_MAGNITUDE {
            Self::High
        } else if magnitude >= CONFIDENCE_MEDIUM_MAGNITUDE {
            Self::Medium
        } else if magnitude >= CONFIDENCE_LOW_MAGNITUDE {
            Self::Low
        } else {
            Self::None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY_HIGH",
        }
    }
}

impl fmt::Display for FactorConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_value_table() {
        for pair in FactorConfidence::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].value() < pair[1].value());
        }
    }

    #[test]
    fn test_from_magnitude_bands() {
        assert_eq!(FactorConfidence::from_magnitude(-3.0), FactorConfidence::High);
        assert_eq!(FactorConfidence::from_magnitude(1.5), FactorConfidence::Medium);
        assert_eq!(FactorConfidence::from_magnitude(0.49), FactorConfidence::None);
        assert_eq!(FactorConfidence::from_magnitude(0.5), FactorConfidence::Low);
    }

    #[test]
    fn test_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&FactorConfidence::VeryHigh).unwrap();
        assert_eq!(json, "\"VERY_HIGH\"");
    }
}
