//! Native log setup for binaries built on this crate.
//!
//! The browser client routes the `tracing` `log` facade through
//! `console_log` instead; this module is not compiled for `wasm32`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `homeschool=debug`.
pub const LOG_FILTER_VAR: &str = "HOMESCHOOL_LOG";

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Install a `fmt` subscriber on stderr. Later calls are no-ops, as is a
/// call made after some other subscriber was already installed.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
