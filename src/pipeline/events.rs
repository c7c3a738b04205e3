//! File change events and their classification.

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::constants::MARKUP_EXTENSION;
use crate::core::{EntityName, Technology};

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File created
    Added,
    /// File contents changed
    Changed,
    /// File deleted
    Removed,
}

/// A single file change reported by a watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// What happened
    pub kind: ChangeKind,
    /// Affected file
    pub path: PathBuf,
}

impl ChangeEvent {
    /// A file was created.
    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ChangeKind::Added,
            path: path.into(),
        }
    }

    /// A file changed.
    pub fn changed(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ChangeKind::Changed,
            path: path.into(),
        }
    }

    /// A file was deleted.
    pub fn removed(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ChangeKind::Removed,
            path: path.into(),
        }
    }
}

/// What a changed path belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeTarget {
    /// A page template, by name
    Page(String),
    /// A file copied verbatim to the output root
    Static,
    /// A text technology file of an entity
    EntityFile {
        /// Entity name
        entity: String,
        /// Technology of the file
        technology: Technology,
    },
    /// A file in an entity's `img/` or `fonts/` directory
    EntityAsset {
        /// Entity directory containing the asset directory
        entity_dir: PathBuf,
        /// Asset technology
        technology: Technology,
    },
    /// Nothing the build cares about
    Unrelated,
}

/// Classify `path` against the project layout.
#[must_use]
pub fn classify(config: &ProjectConfig, path: &Path) -> ChangeTarget {
    if path.starts_with(config.static_dir()) {
        return ChangeTarget::Static;
    }

    if path.parent() == Some(config.templates_dir().as_path())
        && path.extension().and_then(|e| e.to_str()) == Some(MARKUP_EXTENSION)
        && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
    {
        return ChangeTarget::Page(stem.to_string());
    }

    let levels = config.level_paths();
    if !levels.iter().any(|level| path.starts_with(level)) {
        return ChangeTarget::Unrelated;
    }

    if let Some(target) = classify_entity_file(&levels, path) {
        return target;
    }

    let asset_technology = path
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .and_then(Technology::from_asset_dir);
    match (asset_technology, path.parent().and_then(Path::parent)) {
        (Some(technology), Some(entity_dir)) => ChangeTarget::EntityAsset {
            entity_dir: entity_dir.to_path_buf(),
            technology,
        },
        _ => ChangeTarget::Unrelated,
    }
}

fn classify_entity_file(levels: &[PathBuf], path: &Path) -> Option<ChangeTarget> {
    let technology = Technology::from_extension(path.extension()?.to_str()?)?;
    let ext = technology.extension()?;
    let name = EntityName::parse(path.file_stem()?.to_str()?).ok()?;

    // The file must sit where the naming scheme puts it on some level.
    levels.iter().any(|level| name.file_path(level, ext) == path).then(|| ChangeTarget::EntityFile {
        entity: name.to_string(),
        technology,
    })
}
