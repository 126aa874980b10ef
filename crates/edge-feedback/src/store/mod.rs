//! Persistence seam for feedback-loop state.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use edge_core::errors::PersistenceError;

/// Trait for persisting one state document across runs.
pub trait StateStore<S>: Send + Sync {
    /// Load the stored state. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<S>, PersistenceError>;
    /// Replace the stored state.
    fn save(&self, state: &S) -> Result<(), PersistenceError>;
    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}

impl<S, T: StateStore<S> + ?Sized> StateStore<S> for Arc<T> {
    fn load(&self) -> Result<Option<S>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, state: &S) -> Result<(), PersistenceError> {
        (**self).save(state)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// RFC 3339 timestamp for `last_updated` fields.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}
