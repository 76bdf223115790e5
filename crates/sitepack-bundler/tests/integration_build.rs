//! End-to-end builds against scratch projects.

use sitepack_bundler::{BuildConfig, EngineName, Engine, MinifyOptions, PluginKind, SourceMapMode, build};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/greet.ts",
        "export function greet(name: string): string {\n  return `hello ${name}`;\n}\n",
    );
    write(
        dir.path(),
        "src/index.ts",
        "import { greet } from './greet';\nif (process.env.ENV === 'production') {\n  console.log(greet('prod'));\n} else {\n  console.log(greet('dev'));\n}\n",
    );
    dir
}

#[tokio::test]
async fn test_build_writes_bundle() {
    let dir = project();
    let config = BuildConfig::new("src/index.ts")
        .with_outdir("dist")
        .with_cwd(dir.path());

    let outcome = build(&config).await.unwrap();

    assert!(!outcome.has_errors(), "errors: {:?}", outcome.errors);
    assert!(outcome.output_files.iter().any(|f| f == "index.js"));
    let bundle = fs::read_to_string(dir.path().join("dist/index.js")).unwrap();
    assert!(bundle.contains("hello"));
}

#[tokio::test]
async fn test_define_replaces_env() {
    let dir = project();
    let mut config = BuildConfig::new("src/index.ts")
        .with_outdir("dist")
        .with_cwd(dir.path())
        .with_define("process.env.ENV", "\"production\"")
        .with_define("process.env.WATCH_MODE", "true");
    config.engines = vec![Engine::new(EngineName::Chrome, "58")];

    let outcome = build(&config).await.unwrap();

    assert!(!outcome.has_errors(), "errors: {:?}", outcome.errors);
    let bundle = fs::read_to_string(dir.path().join("dist/index.js")).unwrap();
    assert!(!bundle.contains("process.env.ENV"));
}

#[tokio::test]
async fn test_minified_output_is_smaller() {
    let dir = project();
    let plain = BuildConfig::new("src/index.ts")
        .with_outdir("plain")
        .with_cwd(dir.path());
    let mut minified = plain.clone().with_outdir("min");
    minified.minify = MinifyOptions::all();

    assert!(!build(&plain).await.unwrap().has_errors());
    assert!(!build(&minified).await.unwrap().has_errors());

    let plain_len = fs::metadata(dir.path().join("plain/index.js")).unwrap().len();
    let min_len = fs::metadata(dir.path().join("min/index.js")).unwrap().len();
    assert!(min_len < plain_len);
}

#[tokio::test]
async fn test_inline_sourcemap() {
    let dir = project();
    let mut config = BuildConfig::new("src/index.ts")
        .with_outdir("dist")
        .with_cwd(dir.path());
    config.sourcemap = Some(SourceMapMode::Inline);

    assert!(!build(&config).await.unwrap().has_errors());
    let bundle = fs::read_to_string(dir.path().join("dist/index.js")).unwrap();
    assert!(bundle.contains("sourceMappingURL=data:"));
}

#[tokio::test]
async fn test_css_import_with_plugin() {
    let dir = project();
    write(dir.path(), "src/app.css", "body {\n  color: red;\n}\n");
    write(dir.path(), "src/main.ts", "import './app.css';\nconsole.log('styled');\n");
    let config = BuildConfig::new("src/main.ts")
        .with_outdir("dist")
        .with_cwd(dir.path())
        .with_plugin(PluginKind::Css);

    let outcome = build(&config).await.unwrap();
    assert!(!outcome.has_errors(), "errors: {:?}", outcome.errors);
}

#[tokio::test]
async fn test_missing_import_reports_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/index.ts", "import { nope } from './missing';\nconsole.log(nope);\n");
    let config = BuildConfig::new("src/index.ts")
        .with_outdir("dist")
        .with_cwd(dir.path());

    let outcome = build(&config).await.unwrap();

    assert!(outcome.has_errors());
    assert!(outcome.errors.iter().all(|d| d.is_error()));
}

#[tokio::test]
async fn test_generate_without_write() {
    let dir = project();
    let mut config = BuildConfig::new("src/index.ts")
        .with_outdir("dist")
        .with_cwd(dir.path());
    config.write = false;

    let outcome = build(&config).await.unwrap();

    assert!(!outcome.has_errors(), "errors: {:?}", outcome.errors);
    assert!(!outcome.output_files.is_empty());
    assert!(!dir.path().join("dist").exists());
}
