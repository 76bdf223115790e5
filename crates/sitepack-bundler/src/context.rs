//! Long-lived build context: rebuild, watch, serve, dispose.
//!
//! A context owns one immutable [`BuildConfig`]. Watching spawns a background
//! task that rebuilds whenever the source tree changes; serving spawns a
//! static file server. Both run until [`BuildContext::dispose`].

use parking_lot::Mutex;
use rolldown::BundlerBuilder;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::BuildConfig;
use crate::engine::{self, BuildOutcome};
use crate::serve::{self, ServeOptions, ServeResult, ServerHandle};
use crate::watch::{DEFAULT_DEBOUNCE_MS, DEFAULT_IGNORE_PATTERNS, FileChange, FileWatcher};
use crate::{Error, Result};

/// Build context reusable across rebuilds.
pub struct BuildContext {
    config: Arc<BuildConfig>,
    last_outcome: Arc<Mutex<Option<BuildOutcome>>>,
    watch_task: Option<JoinHandle<()>>,
    server: Option<ServerHandle>,
}

impl BuildContext {
    /// Create a context, validating that the engine accepts the config.
    ///
    /// A relative config is pinned to the current directory at creation so
    /// later rebuilds resolve the same paths.
    pub fn new(mut config: BuildConfig) -> Result<Self> {
        let cwd = engine::working_dir(&config)?;
        config.cwd = Some(cwd.clone());

        BundlerBuilder::default()
            .with_options(engine::bundler_options(&config, &cwd))
            .build()
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        Ok(Self {
            config: Arc::new(config),
            last_outcome: Arc::new(Mutex::new(None)),
            watch_task: None,
            server: None,
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Outcome of the most recent build pass, if any has run.
    pub fn last_outcome(&self) -> Option<BuildOutcome> {
        self.last_outcome.lock().clone()
    }

    pub fn is_watching(&self) -> bool {
        self.watch_task.is_some()
    }

    /// Run one build pass now.
    pub async fn rebuild(&self) -> Result<BuildOutcome> {
        run_pass(&self.config, &self.last_outcome).await
    }

    /// Build once, then rebuild on every change below the entry's directory.
    ///
    /// Rebuild failures are logged and the watch keeps running; only failing
    /// to start the watcher is an error.
    pub async fn watch(&mut self) -> Result<()> {
        if self.watch_task.is_some() {
            return Err(Error::InvalidConfig("context is already watching".into()));
        }

        let outdir = self.config.resolve(&self.config.outdir);
        let (watcher, rx) = FileWatcher::new(
            &self.config.watch_root(),
            DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            vec![outdir],
            DEFAULT_DEBOUNCE_MS,
        )?;

        run_pass(&self.config, &self.last_outcome).await?;

        let config = Arc::clone(&self.config);
        let last_outcome = Arc::clone(&self.last_outcome);
        self.watch_task = Some(tokio::spawn(async move {
            // The watcher must live as long as the loop
            let _watcher = watcher;
            rebuild_loop(rx, &config, &last_outcome).await;
        }));

        Ok(())
    }

    /// Serve a directory over HTTP until the context is disposed.
    pub async fn serve(&mut self, options: ServeOptions) -> Result<ServeResult> {
        if self.server.is_some() {
            return Err(Error::InvalidConfig("context is already serving".into()));
        }
        let (handle, result) = serve::start(&options).await?;
        self.server = Some(handle);
        Ok(result)
    }

    /// Stop watching and serving.
    pub async fn dispose(mut self) -> Result<()> {
        if let Some(task) = self.watch_task.take() {
            task.abort();
            // Cancellation is the expected outcome
            let _ = task.await;
        }
        if let Some(server) = self.server.take() {
            server.shutdown().await?;
        }
        tracing::debug!("Build context disposed");
        Ok(())
    }
}

async fn run_pass(
    config: &BuildConfig,
    last_outcome: &Mutex<Option<BuildOutcome>>,
) -> Result<BuildOutcome> {
    let outcome = engine::build(config).await?;
    log_outcome(&outcome);
    *last_outcome.lock() = Some(outcome.clone());
    Ok(outcome)
}

async fn rebuild_loop(
    mut rx: mpsc::Receiver<FileChange>,
    config: &BuildConfig,
    last_outcome: &Mutex<Option<BuildOutcome>>,
) {
    while let Some(change) = rx.recv().await {
        // Editors write in bursts; let the burst settle before rebuilding
        tokio::time::sleep(Duration::from_millis(DEFAULT_DEBOUNCE_MS)).await;
        let mut changed = 1;
        while rx.try_recv().is_ok() {
            changed += 1;
        }

        tracing::info!(path = %change.path().display(), changed, "Change detected, rebuilding");

        if let Err(e) = run_pass(config, last_outcome).await {
            tracing::error!(error = %e, "Rebuild failed");
        }
    }
}

fn log_outcome(outcome: &BuildOutcome) {
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    for error in &outcome.errors {
        tracing::error!("{error}");
    }
    if !outcome.has_errors() {
        tracing::info!(
            files = outcome.output_files.len(),
            duration_ms = outcome.duration.as_millis() as u64,
            "Build succeeded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project() -> (tempfile::TempDir, BuildConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(
            dir.path().join("src/index.ts"),
            "const greeting: string = 'hello';\nconsole.log(greeting);\n",
        )
        .unwrap();
        let config = BuildConfig::new("src/index.ts")
            .with_outdir("public")
            .with_cwd(dir.path());
        (dir, config)
    }

    #[tokio::test]
    async fn test_new_pins_cwd() {
        let (dir, config) = project();
        let ctx = BuildContext::new(config).unwrap();
        assert_eq!(ctx.config().cwd.as_deref(), Some(dir.path()));
        assert!(ctx.last_outcome().is_none());
        assert!(!ctx.is_watching());
    }

    #[tokio::test]
    async fn test_rebuild_records_outcome() {
        let (dir, config) = project();
        let ctx = BuildContext::new(config).unwrap();
        let outcome = ctx.rebuild().await.unwrap();
        assert!(!outcome.has_errors(), "errors: {:?}", outcome.errors);
        assert!(ctx.last_outcome().is_some());
        assert!(dir.path().join("public/index.js").exists());
    }

    #[tokio::test]
    async fn test_watch_runs_initial_build_and_disposes() {
        let (dir, config) = project();
        let mut ctx = BuildContext::new(config).unwrap();
        ctx.watch().await.unwrap();
        assert!(ctx.is_watching());
        assert!(dir.path().join("public/index.js").exists());

        let second = ctx.watch().await;
        assert!(matches!(second, Err(Error::InvalidConfig(_))));

        ctx.dispose().await.unwrap();
    }

    #[tokio::test]
    async fn test_watch_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::new("missing/index.ts").with_cwd(dir.path());
        let mut ctx = BuildContext::new(config).unwrap();
        assert!(ctx.watch().await.is_err());
    }
}
