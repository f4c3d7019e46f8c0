//! Tracing setup for hosts embedding the evaluator.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `QUILL_LOG` (default `warn`).
///
/// Safe to call multiple times. Does nothing if the host already installed
/// a global subscriber.
/// Enable with `QUILL_LOG=quill_eval=debug` or `QUILL_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init();
    });
}
