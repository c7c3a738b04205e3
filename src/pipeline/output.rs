//! Writing build results to the output directory.
//!
//! Output layout:
//!
//! ```text
//! <out_dir>/
//! ├── <page>.html
//! ├── <static files>
//! ├── css/<group>.css
//! ├── js/<group>.js
//! ├── img/<file>
//! └── fonts/<file>
//! ```
//!
//! A re-rendered technology replaces its whole directory so groups that
//! disappeared (a page removed, an entity moved to `common`) leave no stale
//! files behind.

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

use super::BuildUpdate;
use crate::bundle::OutputGroups;
use crate::constants::{BEHAVIOR_OUTPUT_DIR, MARKUP_EXTENSION, STYLE_OUTPUT_DIR};
use crate::core::Technology;
use crate::utils::fs::{clear_dir, copy_file, ensure_dir, remove_file, safe_write};

/// Counts of what an update wrote or deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Pages written
    pub pages: usize,
    /// Style and behavior group files written
    pub groups: usize,
    /// Assets and static files copied
    pub copied: usize,
    /// Files deleted
    pub removed: usize,
}

impl fmt::Display for WriteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} page(s), {} bundle file(s), {} copied, {} removed",
            self.pages, self.groups, self.copied, self.removed
        )
    }
}

/// Puts [`BuildUpdate`]s on disk under one output directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    out_dir: PathBuf,
}

impl OutputWriter {
    /// Writer targeting `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Empty the output directory.
    pub fn clean(&self) -> Result<()> {
        tracing::debug!("Cleaning {}", self.out_dir.display());
        clear_dir(&self.out_dir)
    }

    /// Write everything `update` carries.
    pub fn apply(&self, update: &BuildUpdate) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();
        ensure_dir(&self.out_dir)?;

        for (name, html) in &update.pages {
            safe_write(&self.page_path(name), html)?;
            summary.pages += 1;
        }
        for name in &update.removed_pages {
            remove_file(&self.page_path(name))?;
            summary.removed += 1;
        }

        if let Some(styles) = &update.styles {
            summary.groups += self.write_groups(STYLE_OUTPUT_DIR, Technology::Style, styles)?;
        }
        if let Some(behaviors) = &update.behaviors {
            summary.groups += self.write_groups(BEHAVIOR_OUTPUT_DIR, Technology::Behavior, behaviors)?;
        }

        for asset in &update.assets {
            if let Some(dir) = asset.technology.asset_dir() {
                copy_file(&asset.source, &self.out_dir.join(dir).join(&asset.file_name))?;
                summary.copied += 1;
            }
        }
        for asset in &update.removed_assets {
            if let Some(dir) = asset.technology.asset_dir() {
                remove_file(&self.out_dir.join(dir).join(&asset.file_name))?;
                summary.removed += 1;
            }
        }

        for source in &update.static_files {
            if let Some(name) = source.file_name() {
                copy_file(source, &self.out_dir.join(name))?;
                summary.copied += 1;
            }
        }
        for name in &update.removed_static {
            remove_file(&self.out_dir.join(name))?;
            summary.removed += 1;
        }

        tracing::debug!("Wrote {} to {}", summary, self.out_dir.display());
        Ok(summary)
    }

    fn page_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.{MARKUP_EXTENSION}"))
    }

    fn write_groups(&self, dir: &str, technology: Technology, groups: &OutputGroups) -> Result<usize> {
        let dir = self.out_dir.join(dir);
        clear_dir(&dir)?;

        let Some(ext) = technology.extension() else {
            return Ok(0);
        };
        for (group, content) in groups {
            safe_write(&dir.join(format!("{group}.{ext}")), content)?;
        }
        Ok(groups.len())
    }
}
