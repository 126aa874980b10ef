//! Configuration system for the edge engine.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod calibration_config;
pub mod defaults;
pub mod edge_config;
pub mod engine_config;
pub mod registry_config;
pub mod storage_config;
pub mod variance_config;
pub mod weighting_config;

pub use calibration_config::CalibrationConfig;
pub use edge_config::{CliOverrides, EdgeConfig};
pub use engine_config::EngineConfig;
pub use registry_config::RegistryConfig;
pub use storage_config::StorageConfig;
pub use variance_config::VarianceConfig;
pub use weighting_config::WeightingConfig;

/// Overwrite `base` with `other` when `other` is set.
pub(crate) fn merge_option<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        base.clone_from(other);
    }
}
