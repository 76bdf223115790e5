//! One-shot production (or `-dev`) build.
//!
//! 1. Remove the output directory
//! 2. Copy the public directory into it
//! 3. Bundle the entry point into it
//!
//! Any failure stops the run. Engine error diagnostics are all printed before
//! the command fails.

use crate::commands::utils;
use crate::config::SitepackConfig;
use crate::error::{BuildError, Result};
use crate::{copy, options, ui};
use std::path::Path;
use std::time::Instant;

/// Execute the build command.
pub async fn execute(config: &SitepackConfig, cwd: &Path) -> Result<()> {
    let start_time = Instant::now();
    let out_dir = utils::resolve_path(&config.output, cwd);
    let public_dir = utils::resolve_path(&config.public, cwd);

    utils::check_output_dir(&out_dir, &public_dir, cwd)?;

    ui::info(&format!("Removing {}", config.output.display()));
    utils::remove_output_dir(&out_dir)?;

    ui::info(&format!(
        "Copying {} to {}",
        config.public.display(),
        config.output.display()
    ));
    let copied = copy::copy_dir_recursive(&public_dir, &out_dir)?;
    tracing::debug!(files = copied, "Copied public files");

    ui::info("Building...");
    let build_config = options::assemble(config).with_cwd(cwd);
    let outcome = sitepack_bundler::build(&build_config).await?;

    for warning in &outcome.warnings {
        ui::warning(&warning.to_string());
    }

    if outcome.has_errors() {
        for error in &outcome.errors {
            ui::error(&error.to_string());
        }
        return Err(BuildError::Failed {
            count: outcome.errors.len(),
        }
        .into());
    }

    tracing::debug!(files = ?outcome.output_files, "Wrote bundle");
    ui::success(&format!(
        "Done in {}",
        ui::format_duration(start_time.elapsed())
    ));
    Ok(())
}
