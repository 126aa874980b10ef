//! Factor hierarchy tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Controls how a factor's confidence scales into its dynamic weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorType {
    /// Strong signal; weight never drops below half even at low confidence.
    Primary,
    /// Weight scales linearly with confidence.
    #[default]
    Secondary,
    /// All-or-nothing once confidence is above NONE.
    Trigger,
    /// Acts as a multiplier; dynamic weight is fixed at 1.0.
    Modifier,
}

impl FactorType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Secondary => "SECONDARY",
            Self::Trigger => "TRIGGER",
            Self::Modifier => "MODIFIER",
        }
    }
}

impl fmt::Display for FactorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
