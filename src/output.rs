//! CLI output formatting and log setup.
//!
//! Logs always go to stderr; stdout is reserved for the resolver's path line.

use tracing_subscriber::EnvFilter;

pub const DEBUG_ENV: &str = "VIDWALL_DEBUG";
pub const LOG_ENV: &str = "VIDWALL_LOG";

pub fn debug_enabled() -> bool {
    std::env::var_os(DEBUG_ENV).is_some_and(|v| !v.is_empty())
}

pub fn print_error(err: &anyhow::Error) {
    if debug_enabled() {
        eprintln!("{err:#}");
    } else {
        // Best-effort single line.
        eprintln!("{err}");
    }
}

fn default_directive() -> &'static str {
    if debug_enabled() { "debug" } else { "warn" }
}

/// `$VIDWALL_LOG` as an env-filter, else `debug` with `$VIDWALL_DEBUG`, else `warn`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
