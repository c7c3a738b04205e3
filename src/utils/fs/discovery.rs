//! Reading and listing source files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::file_error::{FileOperation, FileResultExt};

/// Read a text file with path context on failure.
///
/// Invalid UTF-8 is replaced with `U+FFFD` and logged rather than failing
/// the read.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_file_context(
        FileOperation::Read,
        path,
        "reading source file",
        "utils::fs::read_text_file",
    )?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{} is not valid UTF-8, replacing invalid bytes", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Read a text file, returning `None` when it does not exist.
pub fn read_text_file_if_exists(path: &Path) -> Result<Option<String>> {
    if path.is_file() {
        read_text_file(path).map(Some)
    } else {
        Ok(None)
    }
}

/// Regular files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed {} {}", FileOperation::ListDir, dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Files directly inside `dir` whose name matches a glob `pattern`.
pub fn list_files_matching(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = glob::Pattern::new(pattern)?;
    Ok(list_files(dir)?
        .into_iter()
        .filter(|path| {
            path.file_name().and_then(|name| name.to_str()).is_some_and(|name| pattern.matches(name))
        })
        .collect())
}
