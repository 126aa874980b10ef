//! Locations of persisted feedback-loop state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Calibration state file. Relative paths resolve against the project root.
    pub calibration_path: Option<String>,
    /// Weight state file. Relative paths resolve against the project root.
    pub weights_path: Option<String>,
}

impl StorageConfig {
    pub fn effective_calibration_path(&self, root: &Path) -> PathBuf {
        resolve(
            root,
            self.calibration_path
                .as_deref()
                .unwrap_or(defaults::DEFAULT_CALIBRATION_PATH),
        )
    }

    pub fn effective_weights_path(&self, root: &Path) -> PathBuf {
        resolve(
            root,
            self.weights_path
                .as_deref()
                .unwrap_or(defaults::DEFAULT_WEIGHTS_PATH),
        )
    }

    pub(crate) fn merge(&mut self, other: &Self) {
        super::merge_option(&mut self.calibration_path, &other.calibration_path);
        super::merge_option(&mut self.weights_path, &other.weights_path);
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
