//! Logging setup for the sitepack CLI.
//!
//! Events from both crates go through `tracing`. The subscriber is installed
//! once in `main`:
//!
//! 1. `--verbose`: debug level for sitepack crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG` when set
//! 4. otherwise info level for sitepack crates
//!
//! ```rust,no_run
//! use sitepack_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "sitepack=debug,sitepack_bundler=debug,sitepack_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "sitepack=info,sitepack_bundler=info,sitepack_cli=info";

/// Pick the filter directive for the given flags.
pub(crate) fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber.
///
/// Must be called at most once per process.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}
