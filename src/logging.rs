//! Diagnostic logging setup
//!
//! Log lines go to stderr so they never mix with a dispatched command's
//! stdout. The filter comes from `CONDA_SHELL_LOG` (read into
//! [`Config::log_filter`](crate::config::Config)) when set, otherwise from the
//! `-v` flag.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive used when `CONDA_SHELL_LOG` is unset or invalid
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Build the filter from `value` (the contents of `CONDA_SHELL_LOG`)
pub fn filter(value: Option<&str>, verbose: bool) -> EnvFilter {
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber; a second call is a no-op
pub fn init(value: Option<&str>, verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(value, verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
