//! Watch mode: rebuild into the public directory and serve it.
//!
//! The output directory is redirected to the public directory so the served
//! tree holds both static files and the latest bundle. The command blocks
//! until Ctrl+C (or SIGTERM on Unix), then disposes the build context.

use crate::commands::utils;
use crate::config::SitepackConfig;
use crate::error::{Result, ResultExt};
use crate::{options, ui};
use sitepack_bundler::{BuildContext, ServeOptions};
use std::path::Path;

/// Execute the watch command.
pub async fn execute(config: &SitepackConfig, cwd: &Path) -> Result<()> {
    let public_dir = utils::resolve_path(&config.public, cwd);
    let build_config = options::assemble(config)
        .with_outdir(&config.public)
        .with_cwd(cwd);

    ui::info(&format!("Watching {}", build_config.watch_root().display()));

    let mut context = BuildContext::new(build_config)
        .with_hint("Check the -ts entry point and the engine options")?;
    context
        .watch()
        .await
        .context("Failed to start watching")?;

    if let Some(outcome) = context.last_outcome() {
        if outcome.has_errors() {
            for error in &outcome.errors {
                ui::error(&error.to_string());
            }
            ui::warning("Initial build failed, waiting for changes");
        }
    }

    let served = context.serve(ServeOptions::new(config.port, public_dir)).await?;
    ui::success(&format!("Listening on {}", served.url()));
    ui::info("Press Ctrl+C to stop");

    shutdown_signal().await;

    ui::info("Shutting down...");
    context.dispose().await?;
    ui::success("Stopped");
    Ok(())
}

/// Resolve when the process is asked to stop.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
