//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "STREAKQL_LOG";

/// Initialize the StreakQL tracing/logging system.
///
/// Reads `STREAKQL_LOG` for filter directives, e.g.
/// `STREAKQL_LOG=streakql::engine=debug`. Falls back to `streakql=info` if the
/// variable is unset or invalid. Output goes to stderr so it never mixes with
/// exported data on stdout.
///
/// Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("streakql=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
