use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use edge_core::errors::PersistenceError;

use super::StateStore;

/// In-memory implementation of [`StateStore`] for tests and single-run usage.
#[derive(Debug)]
pub struct MemoryStore<S> {
    state: Mutex<Option<S>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl<S> Default for MemoryStore<S> {
    fn default() -> Self {
        Self {
            state: Mutex::new(None),
            fail_saves: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }
}

impl<S: Clone> MemoryStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: S) -> Self {
        let store = Self::default();
        *store.state.lock().unwrap_or_else(PoisonError::into_inner) = Some(state);
        store
    }

    /// Make every subsequent `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Option<S> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S: Clone + Send> StateStore<S> for MemoryStore<S> {
    fn load(&self) -> Result<Option<S>, PersistenceError> {
        Ok(self.stored())
    }

    fn save(&self, state: &S) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::Rejected {
                location: self.location(),
            });
        }
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
