//! Feedback loops that learn from settled games.
//!
//! The [`AdaptiveCalibrator`] rescales confidence from historical hit
//! rates; the [`DynamicWeighter`] retunes per-factor weights. Both persist
//! their state through a [`StateStore`].

pub mod calibrator;
mod matching;
pub mod store;
pub mod weighter;

pub use calibrator::{AdaptiveCalibrator, CalibrationOutcome, CalibrationReport, CalibrationUpdate};
pub use store::{JsonFileStore, MemoryStore, StateStore};
pub use weighter::{DynamicWeighter, WeightAnalysisReport, WeightContext, WeightUpdate};
