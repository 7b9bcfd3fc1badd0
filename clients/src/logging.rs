//! Tracing initialization for the command-line client.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "ONTOCHECK_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "ontocheck=warn";

static INIT: Once = Once::new();

/// Installs the global subscriber.
///
/// Reads per-target levels from `ONTOCHECK_LOG`, for example
/// `ONTOCHECK_LOG=ontocheck_report=debug,ontocheck_graph=info`. Events go to
/// stderr; stdout carries only the report and the summary. Later calls are
/// no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

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
