//! EdgeErrorCode trait for structured error codes at the crate boundary.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human message.
pub trait EdgeErrorCode {
    /// Returns the error code string (e.g., "FACTOR_INVALID_INPUT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const FACTOR_INVALID_INPUT: &str = "FACTOR_INVALID_INPUT";
pub const FACTOR_MISSING_DATA: &str = "FACTOR_MISSING_DATA";
pub const FACTOR_CALCULATION_FAILED: &str = "FACTOR_CALCULATION_FAILED";
pub const REGISTRY_CONFIG_ERROR: &str = "REGISTRY_CONFIG_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
pub const PERSISTENCE_LOCKED: &str = "PERSISTENCE_LOCKED";
