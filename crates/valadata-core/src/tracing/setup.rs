//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Valadata tracing/logging system.
///
/// Reads the `VALADATA_LOG` environment variable for per-crate log levels.
/// Format: `VALADATA_LOG=valadata_engine=debug,valadata_storage=info`
///
/// Falls back to `valadata=info` if `VALADATA_LOG` is not set or is invalid.
/// Logs go to stderr. Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("VALADATA_LOG")
            .unwrap_or_else(|_| EnvFilter::new("valadata=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
