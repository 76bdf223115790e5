//! Build configuration record.
//!
//! `BuildConfig` is a plain data record: it is assembled once per run, never
//! mutated afterwards, and translated into Rolldown options by the engine
//! module. Keeping it free of engine types lets callers construct, compare and
//! log it without touching Rolldown.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Browser engine families that can appear in the target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineName {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl EngineName {
    /// Lowercase name as used in target queries (`chrome58`).
    pub fn as_str(self) -> &'static str {
        match self {
            EngineName::Chrome => "chrome",
            EngineName::Edge => "edge",
            EngineName::Firefox => "firefox",
            EngineName::Safari => "safari",
        }
    }
}

impl fmt::Display for EngineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A minimum engine version the output must run on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Engine {
    pub name: EngineName,
    pub version: String,
}

impl Engine {
    pub fn new(name: EngineName, version: impl Into<String>) -> Self {
        Self {
            name,
            version: version.into(),
        }
    }

    /// Target query string understood by the transformer, e.g. `safari11`.
    pub fn target_query(&self) -> String {
        format!("{}{}", self.name, self.version)
    }

    /// Parse the version as `(major, minor, patch)`.
    ///
    /// Missing components are zero. Returns `None` when the major component is
    /// not a number.
    pub fn version_triple(&self) -> Option<(u32, u32, u32)> {
        let mut parts = self.version.split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let minor = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0);
        let patch = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0);
        Some((major, minor, patch))
    }
}

/// Plugins that can be attached to the engine's plugin pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// lightningcss-backed processing for `.css` imports
    Css,
}

/// Minification toggles.
///
/// Rolldown exposes a single minify switch, so any enabled flag turns on full
/// minification. The three flags are kept separate so the record matches what
/// the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MinifyOptions {
    pub whitespace: bool,
    pub identifiers: bool,
    pub syntax: bool,
}

impl MinifyOptions {
    /// All three minification passes enabled.
    pub fn all() -> Self {
        Self {
            whitespace: true,
            identifiers: true,
            syntax: true,
        }
    }

    /// Returns true if any minification is enabled.
    pub fn is_enabled(&self) -> bool {
        self.whitespace || self.identifiers || self.syntax
    }

    /// Returns true if every minification pass is enabled.
    pub fn is_full(&self) -> bool {
        self.whitespace && self.identifiers && self.syntax
    }
}

/// Source map generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    /// Embedded as a data URL at the end of each chunk
    Inline,
}

impl SourceMapMode {
    pub(crate) fn to_rolldown(self) -> rolldown::SourceMapType {
        match self {
            SourceMapMode::Inline => rolldown::SourceMapType::Inline,
        }
    }
}

/// Configuration consumed by [`crate::build`] and [`crate::BuildContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    /// Entry point (e.g. `src/index.tsx`)
    pub entry: PathBuf,

    /// Directory that receives build artifacts
    pub outdir: PathBuf,

    /// Static assets directory (copied into `outdir`, served in watch mode)
    pub public_dir: PathBuf,

    /// Inline dependencies into the output; when false, bare imports stay external
    pub bundle: bool,

    /// Plugins attached to the engine, in order
    pub plugins: Vec<PluginKind>,

    /// Minimum engine versions the output must support
    pub engines: Vec<Engine>,

    /// Compile-time substitutions (`process.env.ENV` -> `"production"`)
    pub define: BTreeMap<String, String>,

    /// Minification toggles
    pub minify: MinifyOptions,

    /// Source map mode, `None` disables source maps
    pub sourcemap: Option<SourceMapMode>,

    /// Write artifacts to disk (otherwise generate in memory only)
    pub write: bool,

    /// Working directory for resolving relative paths; defaults to the process cwd
    pub cwd: Option<PathBuf>,
}

impl BuildConfig {
    /// Create a config for a single entry point with engine defaults.
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            outdir: PathBuf::from("dist"),
            public_dir: PathBuf::from("public"),
            bundle: true,
            plugins: Vec::new(),
            engines: Vec::new(),
            define: BTreeMap::new(),
            minify: MinifyOptions::default(),
            sourcemap: None,
            write: true,
            cwd: None,
        }
    }

    pub fn with_outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = outdir.into();
        self
    }

    pub fn with_public_dir(mut self, public_dir: impl Into<PathBuf>) -> Self {
        self.public_dir = public_dir.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_define(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.define.insert(key.into(), value.into());
        self
    }

    pub fn with_plugin(mut self, plugin: PluginKind) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Resolve a path against the configured working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match &self.cwd {
            Some(cwd) => cwd.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Directory watched for source changes: the entry point's parent.
    pub fn watch_root(&self) -> PathBuf {
        let entry = self.resolve(&self.entry);
        match entry.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => self.cwd.clone().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Target queries for every configured engine (`["chrome58", ...]`).
    pub fn target_queries(&self) -> Vec<String> {
        self.engines.iter().map(Engine::target_query).collect()
    }
}
