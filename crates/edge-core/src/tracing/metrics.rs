//! Structured field names used in tracing events and spans.
//!
//! Shared across crates so log queries stay consistent.

/// Registry: name of the factor being evaluated.
pub const FACTOR_NAME: &str = "factor";

/// Registry: number of registered factors.
pub const FACTOR_COUNT: &str = "factor_count";

/// Registry: number of factors that activated for a game.
pub const FACTORS_ACTIVATED: &str = "factors_activated";

/// Registry: additive adjustment total for a game.
pub const TOTAL_ADJUSTMENT: &str = "total_adjustment";

/// Variance: coefficient of variation of active factor values.
pub const COEFFICIENT_OF_VARIATION: &str = "coefficient_of_variation";

/// Calibrator: number of matched predictions in an update.
pub const PREDICTIONS_PROCESSED: &str = "predictions_processed";

/// Calibrator: running global adjustment product.
pub const GLOBAL_ADJUSTMENT: &str = "global_adjustment";

/// Weighter: number of factors whose weight change passed the stability gate.
pub const QUALIFYING_CHANGES: &str = "qualifying_changes";

/// Persistence: path or label of a state store.
pub const STATE_LOCATION: &str = "state_location";
