//! Translation from [`BuildConfig`] to Rolldown and the one-shot build.
//!
//! Engine diagnostics never surface as `Err`: a build that fails to resolve or
//! parse returns `Ok(BuildOutcome)` with a non-empty `errors` list. `Err` is
//! reserved for failures outside the engine (an unusable working directory).

use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, OutputFormat, Platform,
    RawMinifyOptions,
};
use rolldown_common::Output;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::Result;
use crate::config::BuildConfig;
use crate::diagnostics::{self, Diagnostic};
use crate::plugins;

/// Result of one build pass.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    /// Error diagnostics; non-empty means the build failed
    pub errors: Vec<Diagnostic>,

    /// Warning diagnostics
    pub warnings: Vec<Diagnostic>,

    /// Files produced, relative to the output directory
    pub output_files: Vec<String>,

    /// Wall-clock duration of the pass
    pub duration: Duration,
}

impl BuildOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn failed(errors: Vec<Diagnostic>, started: Instant) -> Self {
        Self {
            errors,
            duration: started.elapsed(),
            ..Default::default()
        }
    }
}

/// Working directory a config resolves against.
pub(crate) fn working_dir(config: &BuildConfig) -> Result<PathBuf> {
    match &config.cwd {
        Some(cwd) => Ok(cwd.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Absolute, normalized form of `path` under `cwd`.
fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    path_clean::clean(cwd.join(path))
}

/// Build Rolldown options for a config.
///
/// Output is a browser IIFE, matching what a plain `<script>` tag in
/// `index.html` expects.
pub(crate) fn bundler_options(config: &BuildConfig, cwd: &Path) -> BundlerOptions {
    let entry = absolute(cwd, &config.entry);
    let outdir = absolute(cwd, &config.outdir);

    let mut options = BundlerOptions {
        input: Some(vec![InputItem {
            name: None,
            import: entry.to_string_lossy().to_string(),
        }]),
        cwd: Some(cwd.to_path_buf()),
        dir: Some(outdir.to_string_lossy().to_string()),
        format: Some(OutputFormat::Iife),
        platform: Some(Platform::Browser),
        sourcemap: config.sourcemap.map(|mode| mode.to_rolldown()),
        ..Default::default()
    };

    if !config.bundle {
        options.external = Some(IsExternal::from(vec!["^[^./]".to_string()]));
    }

    if config.minify.is_enabled() {
        options.minify = Some(RawMinifyOptions::from(true));
    }

    if !config.define.is_empty() {
        options.define = Some(
            config
                .define
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        );
    }

    let targets = config.target_queries();
    if !targets.is_empty() {
        options.transform = Some(rolldown_common::BundlerTransformOptions {
            target: Some(either::Either::Right(targets)),
            ..Default::default()
        });
    }

    options
}

/// Run a single build pass with the engine.
///
/// Artifacts are written to the output directory when `config.write` is set,
/// otherwise generated in memory and only their names reported.
pub async fn build(config: &BuildConfig) -> Result<BuildOutcome> {
    let started = Instant::now();
    let cwd = working_dir(config)?;
    let options = bundler_options(config, &cwd);

    tracing::debug!(
        entry = %config.entry.display(),
        outdir = %config.outdir.display(),
        minify = config.minify.is_enabled(),
        "Starting build"
    );

    let mut bundler = match BundlerBuilder::default()
        .with_options(options)
        .with_plugins(plugins::instantiate(config))
        .build()
    {
        Ok(bundler) => bundler,
        Err(e) => {
            return Ok(BuildOutcome::failed(
                diagnostics::extract_from_rolldown_error(&e),
                started,
            ));
        }
    };

    let result = if config.write {
        bundler.write().await
    } else {
        bundler.generate().await
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            return Ok(BuildOutcome::failed(
                diagnostics::extract_from_rolldown_error(&e),
                started,
            ));
        }
    };

    let output_files = output
        .assets
        .iter()
        .map(|item| match item {
            Output::Chunk(chunk) => chunk.filename.as_str().to_string(),
            Output::Asset(asset) => asset.filename.as_str().to_string(),
        })
        .collect();

    let warnings = output
        .warnings
        .iter()
        .map(|w| diagnostics::extract_warning(w))
        .collect();

    let outcome = BuildOutcome {
        errors: Vec::new(),
        warnings,
        output_files,
        duration: started.elapsed(),
    };

    tracing::debug!(
        files = outcome.output_files.len(),
        warnings = outcome.warnings.len(),
        duration_ms = outcome.duration.as_millis() as u64,
        "Build finished"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Engine, EngineName, MinifyOptions, SourceMapMode};

    fn config() -> BuildConfig {
        BuildConfig::new("src/index.tsx")
            .with_outdir("dist")
            .with_cwd("/project")
    }

    #[test]
    fn test_paths_are_absolute() {
        let options = bundler_options(&config(), Path::new("/project"));
        let input = options.input.unwrap();
        assert_eq!(input.len(), 1);
        assert_eq!(input[0].import, "/project/src/index.tsx");
        assert_eq!(options.dir.as_deref(), Some("/project/dist"));
        assert_eq!(options.cwd, Some(PathBuf::from("/project")));
    }

    #[test]
    fn test_entry_is_normalized() {
        let config = BuildConfig::new("./src/../src/index.tsx");
        let options = bundler_options(&config, Path::new("/project"));
        assert_eq!(options.input.unwrap()[0].import, "/project/src/index.tsx");
    }

    #[test]
    fn test_browser_iife_output() {
        let options = bundler_options(&config(), Path::new("/project"));
        assert!(matches!(options.format, Some(OutputFormat::Iife)));
        assert!(matches!(options.platform, Some(Platform::Browser)));
    }

    #[test]
    fn test_minify_and_sourcemap_off_by_default() {
        let options = bundler_options(&config(), Path::new("/project"));
        assert!(options.minify.is_none());
        assert!(options.sourcemap.is_none());
        assert!(options.define.is_none());
        assert!(options.transform.is_none());
    }

    #[test]
    fn test_minify_and_sourcemap_enabled() {
        let mut config = config();
        config.minify = MinifyOptions::all();
        config.sourcemap = Some(SourceMapMode::Inline);
        let options = bundler_options(&config, Path::new("/project"));
        assert!(options.minify.is_some());
        assert!(matches!(
            options.sourcemap,
            Some(rolldown::SourceMapType::Inline)
        ));
    }

    #[test]
    fn test_define_is_forwarded() {
        let config = config().with_define("process.env.ENV", "\"production\"");
        let options = bundler_options(&config, Path::new("/project"));
        let define = options.define.unwrap();
        assert!(
            define
                .iter()
                .any(|(k, v)| k.as_str() == "process.env.ENV" && v.as_str() == "\"production\"")
        );
    }

    #[test]
    fn test_unbundled_marks_bare_imports_external() {
        let mut config = config();
        config.bundle = false;
        let options = bundler_options(&config, Path::new("/project"));
        assert!(options.external.is_some());

        let bundled = bundler_options(&self::config(), Path::new("/project"));
        assert!(bundled.external.is_none());
    }

    #[test]
    fn test_engine_targets_set_transform() {
        let mut config = config();
        config.engines = vec![
            Engine::new(EngineName::Chrome, "58"),
            Engine::new(EngineName::Safari, "11"),
        ];
        let options = bundler_options(&config, Path::new("/project"));
        assert!(options.transform.is_some());
    }

    #[test]
    fn test_outcome_has_errors() {
        let mut outcome = BuildOutcome::default();
        assert!(!outcome.has_errors());
        outcome.errors.push(Diagnostic::error(
            crate::DiagnosticKind::Other,
            "boom",
        ));
        assert!(outcome.has_errors());
    }
}
