//! File system watcher with debouncing for watch mode.
//!
//! Watches the source root recursively and filters changes down to files that
//! can affect the bundle: dependency folders, hidden files and the output
//! directory itself are ignored so that writing artifacts never triggers a
//! rebuild.

use crate::{Error, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Directory names ignored anywhere below the watch root.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["node_modules"];

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// File was modified
    Modified(PathBuf),
    /// File was created
    Created(PathBuf),
    /// File was removed
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Which paths a watcher reports.
#[derive(Debug, Clone, Default)]
struct IgnoreRules {
    /// Directory or file name prefixes (`node_modules`) or extension globs (`*.log`)
    patterns: Vec<String>,
    /// Absolute directories whose contents are never reported
    paths: Vec<PathBuf>,
}

impl IgnoreRules {
    fn should_ignore(&self, path: &Path, root: &Path) -> bool {
        if !path.starts_with(root) {
            return true;
        }

        if self.paths.iter().any(|ignored| path.starts_with(ignored)) {
            return true;
        }

        let Ok(rel_path) = path.strip_prefix(root) else {
            return true;
        };
        let path_str = rel_path.to_string_lossy();

        for pattern in &self.patterns {
            if let Some(ext) = pattern.strip_prefix('*') {
                if path_str.ends_with(ext) {
                    return true;
                }
            } else if path_str.starts_with(pattern.as_str())
                || path_str.contains(&format!("/{pattern}"))
            {
                return true;
            }
        }

        rel_path.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| name.starts_with('.') && name != "." && name != "..")
        })
    }
}

/// Canonical form of a path when it exists, the path itself otherwise.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// File watcher with debouncing and filtering.
///
/// Dropping the watcher stops event delivery; the receiver then yields `None`.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `root` recursively.
    ///
    /// `ignore_patterns` match relative paths (`node_modules`, `*.log`),
    /// `ignore_paths` are directories excluded wholesale (the output
    /// directory). Repeated events for the same path inside `debounce_ms`
    /// are collapsed.
    pub fn new(
        root: &Path,
        ignore_patterns: Vec<String>,
        ignore_paths: Vec<PathBuf>,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("watch root does not exist: {}", root.display()),
            )));
        }

        let root = canonical(root);
        let rules = IgnoreRules {
            patterns: ignore_patterns,
            paths: ignore_paths.iter().map(|p| canonical(p)).collect(),
        };

        let (tx, rx) = mpsc::channel(100);
        let debounce = Duration::from_millis(debounce_ms);
        let mut last_event: Option<(PathBuf, Instant)> = None;
        let callback_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };
            for path in &event.paths {
                if rules.should_ignore(path, &callback_root) {
                    continue;
                }

                let now = Instant::now();
                if let Some((last_path, last_time)) = &last_event {
                    if last_path == path && now.duration_since(*last_time) < debounce {
                        continue;
                    }
                }
                last_event = Some((path.clone(), now));

                let change = match event.kind {
                    notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                    notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                    notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                    _ => continue,
                };

                // Receiver gone means the context was disposed
                let _ = tx.blocking_send(change);
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        tracing::debug!(root = %root.display(), "Watching for changes");

        Ok((Self { _watcher: watcher }, rx))
    }
}
