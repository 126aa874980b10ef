//! Compiled default values for every tunable.

// --- Registry ---
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-3;

// --- Variance detector ---
pub const DEFAULT_MIN_ACTIVE_FACTORS: usize = 3;
pub const DEFAULT_OUTLIER_Z_THRESHOLD: f64 = 1.5;
pub const DEFAULT_CONSENSUS_CV: f64 = 0.15;
pub const DEFAULT_MILD_CV: f64 = 0.30;
pub const DEFAULT_MODERATE_CV: f64 = 0.50;
pub const DEFAULT_STRONG_CV: f64 = 0.75;
pub const DEFAULT_CATEGORY_CONSENSUS_CV: f64 = 0.3;
pub const DEFAULT_INTER_CATEGORY_CONFLICT_CV: f64 = 0.5;

// --- Adaptive calibrator ---
pub const DEFAULT_CALIBRATION_MIN_SAMPLES: u32 = 10;
pub const DEFAULT_CALIBRATION_FLOOR: f64 = 0.15;
pub const DEFAULT_CALIBRATION_CEILING: f64 = 0.85;
pub const DEFAULT_BUCKET_ERROR_FLAG: f64 = 0.1;
pub const DEFAULT_QUALITY_MIN_PREDICTIONS: u64 = 20;

// --- Dynamic weighter ---
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;
pub const DEFAULT_WEIGHTING_MIN_SAMPLES: usize = 15;
pub const DEFAULT_STABILITY_THRESHOLD: f64 = 0.1;
pub const DEFAULT_MIN_QUALIFYING_FACTORS: usize = 3;
pub const DEFAULT_MIN_FACTOR_WEIGHT: f64 = 0.01;
pub const DEFAULT_MAX_FACTOR_WEIGHT: f64 = 0.5;
pub const DEFAULT_PERFORMANCE_MIN_SAMPLES: u32 = 10;

// --- Storage ---
pub const DEFAULT_CALIBRATION_PATH: &str = "data/calibration_state.json";
pub const DEFAULT_WEIGHTS_PATH: &str = "data/weight_state.json";

// --- Engine ---
pub const DEFAULT_MIN_EDGE: f64 = 1.0;
pub const DEFAULT_STRONG_EDGE: f64 = 3.0;
pub const DEFAULT_MODERATE_EDGE: f64 = 1.5;
pub const DEFAULT_SLIGHT_EDGE: f64 = 0.5;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.15;
pub const DEFAULT_MAX_CONFIDENCE: f64 = 0.95;

// --- Edge detector ---
pub const DEFAULT_MAX_RECOMMENDED_EDGE: f64 = 5.0;
pub const DEFAULT_MIN_ACTION_CONFIDENCE: f64 = 0.40;
pub const DEFAULT_MIN_DATA_QUALITY: f64 = 0.30;
