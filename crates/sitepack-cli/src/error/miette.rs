//! Miette rendering for CLI errors.

use crate::error::{BuildError, CliError, ConfigError};
use ::miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(BuildError::Failed { count }) => ::miette::miette!(
            help = "Fix the errors listed above and run the build again",
            "Build failed with {} error(s)",
            count
        ),
        CliError::Config(ConfigError::InvalidValue { field, value, hint }) => ::miette::miette!(
            help = hint,
            "Invalid value for '{}': {}",
            field,
            value
        ),
        CliError::Copy { path, source } => ::miette::miette!(
            help = "Check that the public directory exists and is readable",
            "Failed to copy {}: {}",
            path.display(),
            source
        ),
        CliError::Bundler(e) => bundler_error_to_miette(e),
        other => ::miette::miette!("{}", other),
    }
}

/// Convert a sitepack-bundler Error to a miette Report
pub fn bundler_error_to_miette(err: sitepack_bundler::Error) -> Report {
    match err {
        sitepack_bundler::Error::Bundler(diagnostics) => match diagnostics.split_first() {
            None => ::miette::miette!("Unknown bundler error"),
            Some((primary, rest)) => {
                let help = primary
                    .help
                    .clone()
                    .unwrap_or_else(|| format!("{} more diagnostic(s) not shown", rest.len()));
                ::miette::miette!(help = help, "{}", primary)
            }
        },
        sitepack_bundler::Error::Serve(msg) => ::miette::miette!(
            help = "Pick another port with -port or stop the process using it",
            "Server error: {}",
            msg
        ),
        other => ::miette::miette!("{}", other),
    }
}
