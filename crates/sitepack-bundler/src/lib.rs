//! Sitepack bundler - the engine side of the sitepack CLI.
//!
//! This crate wraps Rolldown behind a small, stable surface:
//!
//! - [`BuildConfig`] - the immutable configuration record for one run
//! - [`build`] - a one-shot build that writes artifacts and reports diagnostics
//! - [`BuildContext`] - a long-lived context that can watch sources, serve a
//!   directory over HTTP and be disposed
//!
//! Module resolution, transforms and chunk generation all happen inside
//! Rolldown. What lives here is the translation from [`BuildConfig`] into
//! Rolldown options, diagnostic extraction, the CSS plugin, and the watch and
//! serve plumbing.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitepack_bundler::{BuildConfig, build};
//!
//! # async fn example() -> sitepack_bundler::Result<()> {
//! let config = BuildConfig::new("src/index.tsx").with_outdir("dist");
//! let outcome = build(&config).await?;
//! for diagnostic in &outcome.errors {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod plugins;
pub mod serve;
pub mod watch;

pub use config::{BuildConfig, Engine, EngineName, MinifyOptions, PluginKind, SourceMapMode};
pub use context::BuildContext;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSeverity};
pub use engine::{BuildOutcome, build};
pub use serve::{ServeOptions, ServeResult};
pub use watch::{FileChange, FileWatcher};

use thiserror::Error;

/// Errors produced by the engine adapter.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine rejected the configuration or failed while bundling
    #[error("{}", format_bundler_error(.0))]
    Bundler(Vec<Diagnostic>),

    /// Configuration that cannot be turned into engine options
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Static server errors (bind failures, accept loop failures)
    #[error("Server error: {0}")]
    Serve(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Convert a Rolldown batched error into an `Error::Bundler`.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }
}

/// Format bundler error diagnostics for display.
fn format_bundler_error(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [single] => format!("{}: {}", single.kind, single.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}
