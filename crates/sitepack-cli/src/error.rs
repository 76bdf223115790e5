//! Error types for the sitepack CLI.
//!
//! `CliError` is what every command returns. Domain errors (`ConfigError`,
//! `BuildError`) convert into it automatically, and the binary renders it
//! through miette (see [`cli_error_to_miette`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use sitepack_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_index(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read index.html")
//! }
//! ```

mod miette;

pub use self::miette::{bundler_error_to_miette, cli_error_to_miette};

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The build ran and failed, or its preparation did
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Copying the public directory failed at `path`
    #[error("Failed to copy {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine adapter errors (context creation, watch, serve)
    #[error(transparent)]
    Bundler(#[from] sitepack_bundler::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create sitepack.config.json or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Sources could not be merged into a configuration
    #[error("Failed to load configuration: {0}\n\nHint: Check sitepack.config.json syntax and SITEPACK_* variables")]
    Extract(String),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Build process errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The engine reported error diagnostics
    #[error("Build failed with {count} {}", error_noun(.count))]
    Failed { count: usize },

    /// The output directory could not be removed
    #[error("Failed to remove {}: {source}\n\nHint: Check directory permissions", .path.display())]
    RemoveOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory would take the project or its public files with it
    #[error("Refusing to remove {}: {reason}\n\nHint: Point -output at a dedicated build directory", .path.display())]
    UnsafeOutput { path: PathBuf, reason: String },
}

fn error_noun(count: &usize) -> &'static str {
    if *count == 1 { "error" } else { "errors" }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Append a hint line to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
