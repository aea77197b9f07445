//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the RetryStorm tracing/logging system.
///
/// Reads the `RETRYSTORM_LOG` environment variable for per-module log levels,
/// e.g. `RETRYSTORM_LOG=retrystorm_analysis::call_graph=debug`.
///
/// When `RETRYSTORM_LOG` is unset or invalid, `verbosity` picks the level:
/// 0 → warn, 1 → info, 2+ → debug.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

        // try_init: a host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_LOG_FILTER,
        1 => "retrystorm=info",
        _ => "retrystorm=debug",
    }
}

#[cfg(test)]
mod tests {
    use super::default_filter;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_filter(0), "retrystorm=warn");
        assert_eq!(default_filter(1), "retrystorm=info");
        assert_eq!(default_filter(5), "retrystorm=debug");
    }
}
