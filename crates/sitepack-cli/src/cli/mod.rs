//! Command-line interface definition.
//!
//! Flags are declared with clap's derive API. Every build option is an
//! `Option` so the configuration layer can tell "not given" apart from an
//! explicit value and let config files and environment variables fill the
//! gaps. Go-style single-dash long flags (`-dev`, `-port=8080`) are rewritten
//! by [`normalize_args`] before clap sees them.

mod normalize;

use clap::Parser;
use clap::builder::BoolishValueParser;
use std::path::PathBuf;

pub use normalize::{LONG_FLAGS, normalize_args};

/// sitepack - bundle a TypeScript app and its static files for the browser
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(
    name = "sitepack",
    version,
    about = "Bundle a TypeScript app and its static files for the browser",
    long_about = "sitepack builds a single browser bundle with Rolldown.\n\n\
                  By default it removes the output directory, copies the public directory\n\
                  into it and writes a minified production bundle. With -watch it rebuilds\n\
                  into the public directory on every change and serves it on localhost."
)]
pub struct Cli {
    /// Development mode: "development" env define, inline source maps, no minification
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub dev: Option<bool>,

    /// Watch sources, rebuild on change and serve the public directory
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub watch: Option<bool>,

    /// Port for the watch-mode HTTP server [default: 4242]
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Build output directory [default: dist]
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Static assets directory, copied into the output and served in watch mode [default: public]
    #[arg(long, value_name = "DIR")]
    pub public: Option<PathBuf>,

    /// Entry point [default: src/index.tsx]
    #[arg(long, value_name = "FILE")]
    pub ts: Option<PathBuf>,

    /// Configuration file [default: sitepack.config.json when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse normalized process arguments, exiting with status 2 on error.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}
