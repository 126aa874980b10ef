//! Errors from loading or saving feedback-loop state.

use super::error_code::{self, EdgeErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to serialize state: {message}")]
    Serialize { message: String },

    #[error("failed to deserialize state from {path}: {message}")]
    Deserialize { path: String, message: String },

    #[error("could not lock {path}: {message}")]
    Lock { path: String, message: String },

    /// Raised by in-memory stores configured to reject writes.
    #[error("store at {location} rejected the write")]
    Rejected { location: String },
}

impl EdgeErrorCode for PersistenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Lock { .. } => error_code::PERSISTENCE_LOCKED,
            _ => error_code::PERSISTENCE_ERROR,
        }
    }
}
