//! Trait seams shared across crates.

pub mod factor;
pub mod safe_calculate;

pub use factor::{validate_matchup, Factor};
pub use safe_calculate::{dynamic_weight, panic_message, safe_calculate, weighted_value};
