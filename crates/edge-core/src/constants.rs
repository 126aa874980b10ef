//! Shared constants for the edge engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag written into persisted calibration and weight state.
pub const STATE_VERSION: &str = "2.0";

/// Absolute tolerance for the normalized weight sum.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// |value| below which an explanation reports a neutral impact.
pub const NEUTRAL_IMPACT_EPSILON: f64 = 0.1;

// ---- Factor defaults ----

/// Default activation threshold for a factor that declares none.
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.5;

/// Default maximum impact for a factor that declares none.
pub const DEFAULT_MAX_IMPACT: f64 = 5.0;

/// Default output range bound (symmetric).
pub const DEFAULT_OUTPUT_BOUND: f64 = 5.0;

/// Category assigned to a factor that declares none.
pub const DEFAULT_CATEGORY: &str = "unknown";

// ---- Magnitude bands for the default confidence mapping ----

pub const CONFIDENCE_HIGH_MAGNITUDE: f64 = 3.0;
pub const CONFIDENCE_MEDIUM_MAGNITUDE: f64 = 1.5;
pub const CONFIDENCE_LOW_MAGNITUDE: f64 = 0.5;

/// Floor applied to a PRIMARY factor's confidence when scaling its weight.
pub const PRIMARY_CONFIDENCE_FLOOR: f64 = 0.5;
