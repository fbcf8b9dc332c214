//! Diagnostic logging for the `kit` binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary, which calls [`init`] once at startup. Events go to stderr so
//! they never mix with command output on stdout.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the filter directives, e.g. `kit=debug`
pub const LOG_ENV_VAR: &str = "KIT_LOG";

const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // a subscriber installed earlier (e.g. by a test harness) wins
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
