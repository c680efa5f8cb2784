//! Logging setup built on `tracing`.
//!
//! Logs go to stderr so the text report on stdout stays clean.
//!
//! ```rust,no_run
//! use modscope::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false);
//! info!("scanning modules");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "modscope=info";
const VERBOSE_FILTER: &str = "modscope=debug";
const QUIET_FILTER: &str = "modscope=error";

/// Picks the log filter for the given flags.
///
/// `verbose` wins over `quiet`. With neither set, `RUST_LOG` is honored and
/// falls back to info level for this crate.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}
