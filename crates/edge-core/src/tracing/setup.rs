//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "EDGE_LOG";

/// Filter used when `EDGE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "edge=info";

/// Initialize the edge tracing/logging system.
///
/// Reads `EDGE_LOG` for per-subsystem log levels.
/// Format: `EDGE_LOG=edge_factors=debug,edge_feedback=info`
///
/// Idempotent. If another global subscriber is already installed (for
/// example by a host application) this leaves it in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!(target: "edge_core", "tracing initialized twice without panic");
    }
}
