//! Tests for the edge configuration system.

use std::sync::Mutex;

use edge_core::config::edge_config::{CliOverrides, EdgeConfig};
use edge_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_edge_env_vars() {
    for key in [
        "EDGE_MIN_EDGE",
        "EDGE_LEARNING_RATE",
        "EDGE_WEIGHTING_MIN_SAMPLES",
        "EDGE_CALIBRATION_MIN_SAMPLES",
        "EDGE_OUTLIER_Z",
        "EDGE_CALIBRATION_PATH",
        "EDGE_WEIGHTS_PATH",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_four_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_edge_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("edge.toml"),
        r#"
[engine]
min_edge = 2.0

[weighting]
learning_rate = 0.2
"#,
    )
    .unwrap();

    std::env::set_var("EDGE_MIN_EDGE", "1.5");

    let cli = CliOverrides {
        learning_rate: Some(0.3),
        ..Default::default()
    };
    let config = EdgeConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.engine.min_edge, Some(1.5));
    assert_eq!(config.weighting.learning_rate, Some(0.3));

    clear_edge_env_vars();
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_edge_env_vars();

    let dir = tempdir();
    let config = EdgeConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.engine.effective_min_edge(), 1.0);
    assert_eq!(config.engine.effective_type_thresholds(), (3.0, 1.5, 0.5));
    assert_eq!(config.engine.effective_risk_limits(), (5.0, 0.40, 0.30));
    assert_eq!(config.variance.effective_min_active_factors(), 3);
    assert_eq!(config.variance.effective_outlier_z_threshold(), 1.5);
    assert_eq!(config.calibration.effective_min_samples(), 10);
    assert_eq!(config.weighting.effective_min_samples(), 15);
    assert_eq!(config.weighting.effective_weight_bounds(), (0.01, 0.5));
    assert_eq!(
        config.storage.effective_calibration_path(dir.path()),
        dir.path().join("data/calibration_state.json")
    );
}

#[test]
fn test_storage_env_override_and_absolute_path() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_edge_env_vars();

    let dir = tempdir();
    let absolute = dir.path().join("state").join("w.json");
    std::env::set_var("EDGE_WEIGHTS_PATH", absolute.display().to_string());

    let config = EdgeConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.storage.effective_weights_path(dir.path()), absolute);

    clear_edge_env_vars();
}

#[test]
fn test_unparseable_env_var_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_edge_env_vars();

    std::env::set_var("EDGE_LEARNING_RATE", "fast");
    let dir = tempdir();
    let config = EdgeConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.weighting.learning_rate, None);

    clear_edge_env_vars();
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_edge_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("edge.toml"), "[engine\nmin_edge = ").unwrap();

    let err = EdgeConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_values_rejected() {
    let cases = [
        "[weighting]\nlearning_rate = 0.0",
        "[weighting]\nmin_factor_weight = 0.6",
        "[calibration]\nconfidence_floor = 0.9",
        "[variance]\nlevel_thresholds = [0.3, 0.2, 0.5, 0.7]",
        "[engine]\nslight_edge = 2.0",
        "[registry.weight_overrides]\nStyleMismatch = -0.5",
    ];
    for case in cases {
        let config = EdgeConfig::from_toml(case).unwrap();
        let err = EdgeConfig::validate(&config).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationFailed { .. }),
            "expected validation failure for {case:?}"
        );
    }
}

#[test]
fn test_unrecognized_keys_accepted() {
    let config = EdgeConfig::from_toml(
        r#"
[engine]
min_edge = 1.25
future_knob = true

[future_section]
x = 1
"#,
    )
    .unwrap();
    assert_eq!(config.engine.min_edge, Some(1.25));
}

#[test]
fn test_config_round_trip() {
    let mut config = EdgeConfig::default();
    config.engine.min_edge = Some(2.5);
    config.variance.level_thresholds = Some([0.1, 0.2, 0.4, 0.8]);
    config
        .registry
        .weight_overrides
        .insert("SchedulingFatigue".to_string(), 0.4);

    let text = config.to_toml().unwrap();
    let back = EdgeConfig::from_toml(&text).unwrap();

    assert_eq!(back.engine.min_edge, Some(2.5));
    assert_eq!(back.variance.level_thresholds, Some([0.1, 0.2, 0.4, 0.8]));
    assert_eq!(back.registry.weight_overrides.get("SchedulingFatigue"), Some(&0.4));
}
