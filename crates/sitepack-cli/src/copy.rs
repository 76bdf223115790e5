//! Recursive directory copy for the public directory.
//!
//! The walk is depth-first in file-name order. Directories are created as they
//! are reached, files are copied byte for byte, and the first failure stops
//! the walk. Files already copied stay in place and destination files with no
//! counterpart in the source are never touched.

use crate::error::{CliError, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Copy the tree under `src` into `dst`, returning the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            CliError::Copy {
                path,
                source: e.into_io_error().unwrap_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidData, "filesystem loop detected")
                }),
            }
        })?;

        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| CliError::Custom(format!("{} escaped {}", entry.path().display(), src.display())))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| CliError::Copy {
                path: target.clone(),
                source,
            })?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let mut reader = File::open(from).map_err(|source| CliError::Copy {
        path: from.to_path_buf(),
        source,
    })?;
    let mut writer = File::create(to).map_err(|source| CliError::Copy {
        path: to.to_path_buf(),
        source,
    })?;
    io::copy(&mut reader, &mut writer).map_err(|source| CliError::Copy {
        path: from.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn tree(files: &[(&str, &[u8])]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, contents) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_copy_into_empty_reproduces_tree() {
        let src = tree(&[
            ("index.html", b"<html></html>"),
            ("css/site.css", b"body{}"),
            ("img/icons/logo.png", &[0x89, 0x50, 0x4e, 0x47, 0x00, 0xff]),
        ]);
        fs::create_dir_all(src.path().join("empty")).unwrap();
        let dst = tempfile::tempdir().unwrap();
        let out = dst.path().join("dist");

        let copied = copy_dir_recursive(src.path(), &out).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(fs::read(out.join("index.html")).unwrap(), b"<html></html>");
        assert_eq!(fs::read(out.join("css/site.css")).unwrap(), b"body{}");
        assert_eq!(
            fs::read(out.join("img/icons/logo.png")).unwrap(),
            [0x89, 0x50, 0x4e, 0x47, 0x00, 0xff]
        );
        assert!(out.join("empty").is_dir());
    }

    #[test]
    fn test_copy_overwrites_and_keeps_unrelated() {
        let src = tree(&[("index.html", b"new")]);
        let dst = tree(&[("index.html", b"old old old"), ("keep.txt", b"mine")]);

        copy_dir_recursive(src.path(), dst.path()).unwrap();

        assert_eq!(fs::read(dst.path().join("index.html")).unwrap(), b"new");
        assert_eq!(fs::read(dst.path().join("keep.txt")).unwrap(), b"mine");
    }

    #[test]
    fn test_missing_source_is_copy_error() {
        let dst = tempfile::tempdir().unwrap();
        let missing = PathBuf::from("/definitely/not/a/public/dir");

        let err = copy_dir_recursive(&missing, dst.path()).unwrap_err();

        assert!(matches!(err, CliError::Copy { ref path, .. } if path == &missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_entry_aborts_and_keeps_earlier_files() {
        let src = tree(&[("a.txt", b"first"), ("c.txt", b"never")]);
        let broken = src.path().join("b.txt");
        std::os::unix::fs::symlink("/nonexistent/sitepack-target", &broken).unwrap();
        let dst = tempfile::tempdir().unwrap();

        let err = copy_dir_recursive(src.path(), dst.path()).unwrap_err();

        assert!(matches!(err, CliError::Copy { ref path, .. } if path == &broken));
        assert_eq!(fs::read(dst.path().join("a.txt")).unwrap(), b"first");
        assert!(!dst.path().join("b.txt").exists());
        assert!(!dst.path().join("c.txt").exists());
    }
}
