//! Top-level edge engine configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    CalibrationConfig, EngineConfig, RegistryConfig, StorageConfig, VarianceConfig,
    WeightingConfig,
};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "edge.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`EDGE_*`)
/// 3. Project config (`edge.toml` in project root)
/// 4. User config (`~/.edge/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    pub registry: RegistryConfig,
    pub variance: VarianceConfig,
    pub calibration: CalibrationConfig,
    pub weighting: WeightingConfig,
    pub storage: StorageConfig,
    pub engine: EngineConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_edge: Option<f64>,
    pub learning_rate: Option<f64>,
    pub calibration_path: Option<String>,
    pub weights_path: Option<String>,
}

impl EdgeConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %err,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &EdgeConfig) -> Result<(), ConfigError> {
        if let Some(tol) = config.registry.weight_tolerance {
            if !(tol > 0.0 && tol < 1.0) {
                return Err(invalid("registry.weight_tolerance", "must be in (0.0, 1.0)"));
            }
        }
        for (name, weight) in &config.registry.weight_overrides {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("registry.weight_overrides.{name}"),
                    message: "must be a finite non-negative number".to_string(),
                });
            }
        }

        if config.variance.min_active_factors == Some(0) {
            return Err(invalid("variance.min_active_factors", "must be greater than 0"));
        }
        if let Some(z) = config.variance.outlier_z_threshold {
            if !(z > 0.0) {
                return Err(invalid("variance.outlier_z_threshold", "must be greater than 0.0"));
            }
        }
        if let Some(levels) = config.variance.level_thresholds {
            let ascending = levels.windows(2).all(|w| w[0] < w[1]);
            if !ascending || levels[0] <= 0.0 {
                return Err(invalid(
                    "variance.level_thresholds",
                    "must be positive and strictly ascending",
                ));
            }
        }

        let floor = config.calibration.effective_confidence_floor();
        let ceiling = config.calibration.effective_confidence_ceiling();
        if !(0.0..=1.0).contains(&floor) || !(0.0..=1.0).contains(&ceiling) || floor >= ceiling {
            return Err(invalid(
                "calibration.confidence_floor",
                "floor and ceiling must lie in [0.0, 1.0] with floor < ceiling",
            ));
        }

        if let Some(rate) = config.weighting.learning_rate {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(invalid("weighting.learning_rate", "must be in (0.0, 1.0]"));
            }
        }
        let (min_w, max_w) = config.weighting.effective_weight_bounds();
        if !(min_w >= 0.0 && min_w < max_w) {
            return Err(invalid(
                "weighting.min_factor_weight",
                "must be non-negative and below max_factor_weight",
            ));
        }
        if config.weighting.min_samples_for_adjustment == Some(0) {
            return Err(invalid(
                "weighting.min_samples_for_adjustment",
                "must be greater than 0",
            ));
        }

        if let Some(edge) = config.engine.min_edge {
            if !(edge >= 0.0) {
                return Err(invalid("engine.min_edge", "must be non-negative"));
            }
        }
        let (strong, moderate, slight) = config.engine.effective_type_thresholds();
        if !(slight >= 0.0 && slight < moderate && moderate < strong) {
            return Err(invalid(
                "engine.strong_edge",
                "edge thresholds must satisfy 0 <= slight < moderate < strong",
            ));
        }
        Ok(())
    }

    /// Serialize the configuration to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the user config path: `~/.edge/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut EdgeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EdgeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut EdgeConfig, other: &EdgeConfig) {
        base.registry.merge(&other.registry);
        base.variance.merge(&other.variance);
        base.calibration.merge(&other.calibration);
        base.weighting.merge(&other.weighting);
        base.storage.merge(&other.storage);
        base.engine.merge(&other.engine);
    }

    /// Apply `EDGE_*` environment variable overrides.
    fn apply_env_overrides(config: &mut EdgeConfig) {
        if let Some(v) = env_parse::<f64>("EDGE_MIN_EDGE") {
            config.engine.min_edge = Some(v);
        }
        if let Some(v) = env_parse::<f64>("EDGE_LEARNING_RATE") {
            config.weighting.learning_rate = Some(v);
        }
        if let Some(v) = env_parse::<usize>("EDGE_WEIGHTING_MIN_SAMPLES") {
            config.weighting.min_samples_for_adjustment = Some(v);
        }
        if let Some(v) = env_parse::<u32>("EDGE_CALIBRATION_MIN_SAMPLES") {
            config.calibration.min_samples_for_adjustment = Some(v);
        }
        if let Some(v) = env_parse::<f64>("EDGE_OUTLIER_Z") {
            config.variance.outlier_z_threshold = Some(v);
        }
        if let Ok(val) = std::env::var("EDGE_CALIBRATION_PATH") {
            config.storage.calibration_path = Some(val);
        }
        if let Ok(val) = std::env::var("EDGE_WEIGHTS_PATH") {
            config.storage.weights_path = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut EdgeConfig, cli: &CliOverrides) {
        if let Some(v) = cli.min_edge {
            config.engine.min_edge = Some(v);
        }
        if let Some(v) = cli.learning_rate {
            config.weighting.learning_rate = Some(v);
        }
        if let Some(ref v) = cli.calibration_path {
            config.storage.calibration_path = Some(v.clone());
        }
        if let Some(ref v) = cli.weights_path {
            config.storage.weights_path = Some(v.clone());
        }
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse::<T>().ok())
}

/// Returns `~/.edge` if a home directory can be determined.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".edge"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
