//! Top-level error type aggregating every subsystem error.

use super::{ConfigError, EdgeErrorCode, FactorError, PersistenceError, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    #[error(transparent)]
    Factor(#[from] FactorError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl EdgeErrorCode for EdgeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Factor(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Persistence(e) => e.error_code(),
        }
    }
}

pub type EdgeResult<T> = Result<T, EdgeError>;
