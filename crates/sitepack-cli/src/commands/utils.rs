//! Shared helpers for command implementations.

use crate::error::{BuildError, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Lexically normalized absolute form, for containment checks.
fn normalized(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Refuse output directories whose removal would delete the project or the
/// public directory.
pub fn check_output_dir(out_dir: &Path, public_dir: &Path, cwd: &Path) -> Result<()> {
    let out = normalized(out_dir);

    let reason = if normalized(cwd).starts_with(&out) {
        Some("it contains the working directory")
    } else if normalized(public_dir).starts_with(&out) {
        Some("it contains the public directory")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(BuildError::UnsafeOutput {
            path: out_dir.to_path_buf(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Remove the output directory and everything in it.
///
/// A directory that does not exist is not an error.
pub fn remove_output_dir(out_dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(out_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BuildError::RemoveOutput {
            path: out_dir.to_path_buf(),
            source,
        }
        .into()),
    }
}
