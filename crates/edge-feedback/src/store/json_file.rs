//! Pretty-printed JSON file store.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use edge_core::errors::PersistenceError;
use fd_lock::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StateStore;

/// Stores `S` as JSON at a fixed path.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so readers never observe a half-written document. Writers across
/// processes serialize on an advisory lock held on `<file>.lock`.
#[derive(Debug)]
pub struct JsonFileStore<S> {
    path: PathBuf,
    _state: PhantomData<fn() -> S>,
}

impl<S> JsonFileStore<S> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _state: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, err: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl<S> StateStore<S> for JsonFileStore<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(&self.path, e))?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PersistenceError::Deserialize {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
    }

    fn save(&self, state: &S) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        let lock_path = self.sibling(".lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.io_error(&lock_path, e))?;
        let mut lock = RwLock::new(lock_file);
        let _guard = lock.write().map_err(|e| PersistenceError::Lock {
            path: lock_path.display().to_string(),
            message: e.to_string(),
        })?;

        let json = serde_json::to_string_pretty(state).map_err(|e| PersistenceError::Serialize {
            message: e.to_string(),
        })?;

        let tmp_path = self.sibling(".tmp");
        let mut tmp = fs::File::create(&tmp_path).map_err(|e| self.io_error(&tmp_path, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.sync_all())
            .map_err(|e| self.io_error(&tmp_path, e))?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(&self.path, e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
