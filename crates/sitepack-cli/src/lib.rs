//! sitepack CLI - build and serve a browser bundle.
//!
//! The binary is a thin shell over this library:
//!
//! - [`cli`] - flag definitions and Go-style flag normalization
//! - [`config`] - layered configuration (defaults, file, env, flags)
//! - [`options`] - turns configuration into a `sitepack_bundler::BuildConfig`
//! - [`copy`] - recursive copy of the public directory
//! - [`commands`] - the build and watch flows
//! - [`error`], [`logger`], [`ui`] - error types, tracing setup, terminal output
//!
//! # Example
//!
//! ```rust,no_run
//! use sitepack_cli::{cli::Cli, commands, config::SitepackConfig};
//!
//! # async fn example() -> sitepack_cli::Result<()> {
//! let cwd = std::env::current_dir()?;
//! let config = SitepackConfig::load(&Cli::default(), &cwd)?;
//! commands::run(&config, &cwd).await
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod copy;
pub mod error;
pub mod logger;
pub mod options;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
