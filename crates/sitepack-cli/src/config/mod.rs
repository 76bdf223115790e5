//! Configuration with multi-source loading.
//!
//! Merges built-in defaults, `sitepack.config.json`, `SITEPACK_*` environment
//! variables and explicitly given command-line flags.
//! Priority: CLI > Environment > File > Defaults

mod loading;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loading::{CONFIG_FILE, ENV_PREFIX};

/// Default port of the watch-mode server.
pub const DEFAULT_PORT: u16 = 4242;
/// Default build output directory.
pub const DEFAULT_OUTPUT: &str = "dist";
/// Default static assets directory.
pub const DEFAULT_PUBLIC: &str = "public";
/// Default entry point.
pub const DEFAULT_ENTRY: &str = "src/index.tsx";

/// Resolved sitepack settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitepackConfig {
    /// Development defines, inline source maps, no minification
    pub dev: bool,

    /// Watch and serve instead of a one-shot build
    pub watch: bool,

    /// Watch-mode server port
    pub port: u16,

    /// Build output directory
    pub output: PathBuf,

    /// Static assets directory
    pub public: PathBuf,

    /// Bundler entry point
    pub ts: PathBuf,
}

impl Default for SitepackConfig {
    fn default() -> Self {
        Self {
            dev: false,
            watch: false,
            port: DEFAULT_PORT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            public: PathBuf::from(DEFAULT_PUBLIC),
            ts: PathBuf::from(DEFAULT_ENTRY),
        }
    }
}
