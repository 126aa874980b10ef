//! Logging setup and shared event field names.

pub mod metrics;
pub mod setup;

pub use setup::{init_tracing, LOG_ENV_VAR};
