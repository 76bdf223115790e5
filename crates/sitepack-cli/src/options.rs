//! Option assembler: turns a [`SitepackConfig`] into a [`BuildConfig`].
//!
//! Dev builds get the `"development"` env define, inline source maps and no
//! minification. Production builds get `"production"` and full minification.
//! `process.env.WATCH_MODE` is always `true`, whatever `-watch` says. Every
//! build bundles, writes to disk, runs the CSS plugin and targets the same
//! engine list.

use crate::config::SitepackConfig;
use sitepack_bundler::{
    BuildConfig, Engine, EngineName, MinifyOptions, PluginKind, SourceMapMode,
};

/// Define key for the build environment.
pub const ENV_DEFINE: &str = "process.env.ENV";
/// Define key for the watch flag.
pub const WATCH_MODE_DEFINE: &str = "process.env.WATCH_MODE";

/// Minimum browser versions every bundle must run on.
pub fn default_engines() -> Vec<Engine> {
    vec![
        Engine::new(EngineName::Chrome, "58"),
        Engine::new(EngineName::Firefox, "57"),
        Engine::new(EngineName::Safari, "11"),
        Engine::new(EngineName::Edge, "18"),
    ]
}

/// Build the engine configuration for a run.
pub fn assemble(config: &SitepackConfig) -> BuildConfig {
    let env = if config.dev { "development" } else { "production" };

    let mut build = BuildConfig::new(&config.ts)
        .with_outdir(&config.output)
        .with_public_dir(&config.public)
        .with_plugin(PluginKind::Css)
        .with_define(ENV_DEFINE, format!("\"{env}\""))
        .with_define(WATCH_MODE_DEFINE, "true");

    build.bundle = true;
    build.write = true;
    build.engines = default_engines();

    if config.dev {
        build.sourcemap = Some(SourceMapMode::Inline);
        build.minify = MinifyOptions::default();
    } else {
        build.sourcemap = None;
        build.minify = MinifyOptions::all();
    }

    build
}
