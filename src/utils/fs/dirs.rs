//! Directory and whole-file operations.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::file_error::{FileOperation, FileResultExt};

/// Create `path` and its parents if missing.
///
/// Fails when `path` exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Ensure the parent directory of a file path exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Copy a single file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_dir(dst)?;
    fs::copy(src, dst).with_file_context(
        FileOperation::Copy,
        src,
        format!("copying to {}", dst.display()),
        "utils::fs::copy_file",
    )?;
    Ok(())
}

/// Remove a file; a missing file is not an error.
pub fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        result => Ok(result.with_file_context(
            FileOperation::Remove,
            path,
            "removing stale output",
            "utils::fs::remove_file",
        )?),
    }
}

/// Remove everything inside `path` and leave an empty directory behind.
pub fn clear_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).with_file_context(
            FileOperation::Remove,
            path,
            "clearing output directory",
            "utils::fs::clear_dir",
        )?;
    }
    ensure_dir(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("a").join("b");

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Idempotent
        ensure_dir(&dir).unwrap();
    }

    #[test]
    fn test_ensure_dir_on_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = ensure_dir(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_copy_file_and_remove() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("logo.png");
        std::fs::write(&src, [1u8, 2, 3]).unwrap();
        let dst = temp.path().join("out").join("img").join("logo.png");

        copy_file(&src, &dst).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), vec![1, 2, 3]);

        remove_file(&dst).unwrap();
        assert!(!dst.exists());
        // Missing file is fine
        remove_file(&dst).unwrap();
    }

    #[test]
    fn test_clear_dir() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("css");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.css"), "").unwrap();

        clear_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }
}
