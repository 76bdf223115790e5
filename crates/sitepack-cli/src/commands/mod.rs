//! Command implementations.
//!
//! - [`build`] - remove the output directory, copy public files, bundle once
//! - [`watch`] - rebuild into the public directory on change and serve it
//!
//! Both take the resolved configuration and the directory relative paths are
//! resolved against.

pub mod build;
pub(crate) mod utils;
pub mod watch;

pub use build::execute as build_execute;
pub use watch::execute as watch_execute;

use crate::config::SitepackConfig;
use crate::error::Result;
use std::path::Path;

/// Dispatch to the command selected by the configuration.
pub async fn run(config: &SitepackConfig, cwd: &Path) -> Result<()> {
    if config.watch {
        watch_execute(config, cwd).await
    } else {
        build_execute(config, cwd).await
    }
}
