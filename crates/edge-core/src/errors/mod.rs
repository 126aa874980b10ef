//! Error handling for the edge engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod edge_error;
pub mod error_code;
pub mod factor_error;
pub mod persistence_error;
pub mod registry_error;

pub use config_error::ConfigError;
pub use edge_error::{EdgeError, EdgeResult};
pub use error_code::EdgeErrorCode;
pub use factor_error::FactorError;
pub use persistence_error::PersistenceError;
pub use registry_error::RegistryError;
