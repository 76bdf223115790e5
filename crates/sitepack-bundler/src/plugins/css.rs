//! Rolldown plugin that runs `.css` imports through lightningcss.
//!
//! The plugin uses the `load` hook: every `.css` module is parsed, optionally
//! minified, lowered and prefixed for the configured engines, and handed back
//! to Rolldown as a CSS module.
//!
//! ```text
//! .css file → load() hook → parse → minify → print for targets → ModuleType::Css
//! ```

use anyhow::Context;
use lightningcss::{
    stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet},
    targets::{Browsers, Targets},
};
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, HookUsage, Plugin, PluginContext};
use std::borrow::Cow;
use std::path::Path;

use crate::config::{BuildConfig, Engine, EngineName};

/// Configuration options for CSS processing.
#[derive(Debug, Clone, Default)]
pub struct CssPluginOptions {
    /// Minify the printed CSS
    pub minify: bool,

    /// Browser versions the CSS must support (vendor prefixes, syntax lowering)
    pub browsers: Option<Browsers>,

    /// Substrings of module ids to leave untouched
    pub exclude: Vec<String>,
}

impl CssPluginOptions {
    /// Derive CSS options from a build config: minify when the JS output is
    /// minified, target the same engines.
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            minify: config.minify.is_enabled(),
            browsers: browsers_from_engines(&config.engines),
            exclude: vec![".min.css".to_string()],
        }
    }
}

/// Map engine targets onto lightningcss browser versions.
///
/// Versions are encoded as `major << 16 | minor << 8 | patch`. Engines with an
/// unparsable version are skipped; `None` means no targets at all.
pub fn browsers_from_engines(engines: &[Engine]) -> Option<Browsers> {
    let mut browsers = Browsers::default();
    let mut any = false;

    for engine in engines {
        let Some((major, minor, patch)) = engine.version_triple() else {
            tracing::warn!(engine = %engine.name, version = %engine.version, "Ignoring unparsable engine version");
            continue;
        };
        let encoded = Some((major << 16) | (minor << 8) | patch);
        match engine.name {
            EngineName::Chrome => browsers.chrome = encoded,
            EngineName::Edge => browsers.edge = encoded,
            EngineName::Firefox => browsers.firefox = encoded,
            EngineName::Safari => browsers.safari = encoded,
        }
        any = true;
    }

    any.then_some(browsers)
}

/// lightningcss-backed CSS plugin.
#[derive(Debug, Clone, Default)]
pub struct CssPlugin {
    options: CssPluginOptions,
}

impl CssPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CssPluginOptions) -> Self {
        Self { options }
    }

    fn targets(&self) -> Targets {
        self.options.browsers.map(Targets::from).unwrap_or_default()
    }

    /// Process a CSS source through lightningcss.
    pub fn process_css(&self, path: &Path, source: &str) -> anyhow::Result<String> {
        let mut stylesheet = StyleSheet::parse(
            source,
            ParserOptions {
                filename: path.to_string_lossy().to_string(),
                ..Default::default()
            },
        )
        .map_err(|e| anyhow::anyhow!("Failed to parse CSS from {}: {}", path.display(), e))?;

        stylesheet
            .minify(MinifyOptions {
                targets: self.targets(),
                ..Default::default()
            })
            .map_err(|e| anyhow::anyhow!("Failed to minify CSS from {}: {}", path.display(), e))?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: self.options.minify,
                targets: self.targets(),
                ..Default::default()
            })
            .map_err(|e| anyhow::anyhow!("Failed to print CSS from {}: {}", path.display(), e))?;

        Ok(result.code)
    }

    fn should_process(&self, id: &str) -> bool {
        id.ends_with(".css") && !self.options.exclude.iter().any(|p| id.contains(p.as_str()))
    }
}

impl Plugin for CssPlugin {
    fn name(&self) -> Cow<'static, str> {
        "sitepack-css".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Load
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let plugin = self.clone();

        async move {
            if !plugin.should_process(&id) {
                return Ok(None);
            }

            let source = std::fs::read_to_string(&id)
                .with_context(|| format!("Failed to read CSS file: {}", id))?;
            let processed = plugin.process_css(Path::new(&id), &source)?;

            tracing::debug!(
                file = %id,
                before = source.len(),
                after = processed.len(),
                minify = plugin.options.minify,
                "Processed CSS"
            );

            Ok(Some(HookLoadOutput {
                code: processed.into(),
                module_type: Some(ModuleType::Css),
                ..Default::default()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_name() {
        assert_eq!(CssPlugin::new().name(), "sitepack-css");
    }

    #[test]
    fn test_should_process() {
        let plugin = CssPlugin::with_options(CssPluginOptions {
            exclude: vec![".min.css".to_string()],
            ..Default::default()
        });
        assert!(plugin.should_process("/project/src/app.css"));
        assert!(!plugin.should_process("/project/src/vendor.min.css"));
        assert!(!plugin.should_process("/project/src/index.tsx"));
    }

    #[test]
    fn test_browsers_from_engines() {
        let engines = vec![
            Engine::new(EngineName::Chrome, "58"),
            Engine::new(EngineName::Safari, "11.1"),
        ];
        let browsers = browsers_from_engines(&engines).unwrap();
        assert_eq!(browsers.chrome, Some(58 << 16));
        assert_eq!(browsers.safari, Some((11 << 16) | (1 << 8)));
        assert_eq!(browsers.firefox, None);
    }

    #[test]
    fn test_browsers_from_no_engines() {
        assert!(browsers_from_engines(&[]).is_none());
    }

    #[test]
    fn test_process_basic_css() {
        let plugin = CssPlugin::new();
        let result = plugin
            .process_css(Path::new("test.css"), "body { color: red; }")
            .unwrap();
        assert!(result.contains("color"));
    }

    #[test]
    fn test_process_with_minification() {
        let plugin = CssPlugin::with_options(CssPluginOptions {
            minify: true,
            ..Default::default()
        });
        let css = "body {\n  color: red;\n  background: blue;\n}";
        let result = plugin.process_css(Path::new("test.css"), css).unwrap();
        assert!(result.len() < css.len());
        assert!(result.contains("background"));
    }

    #[test]
    fn test_process_invalid_css_reports_path() {
        let plugin = CssPlugin::new();
        let err = plugin
            .process_css(Path::new("broken.css"), "body { color: red; ")
            .map(|_| ())
            .err();
        // lightningcss recovers from an unclosed block, so only check the
        // error message shape when it does fail
        if let Some(err) = err {
            assert!(err.to_string().contains("broken.css"));
        }
    }
}
