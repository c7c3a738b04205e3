//! Project configuration (`bemforge.toml`)
//!
//! The configuration names the ordered override layers, where page templates
//! live, where output goes and how compiled style/behavior output is split
//! into groups.
//!
//! ```toml
//! # Override layers, most general first. Later layers append text sources
//! # and replace same-named image/font assets.
//! levels = ["common.blocks", "src/blocks"]
//! src_dir = "src"
//! out_dir = "build"
//!
//! [split_chunks]
//! style_split = true
//! behavior_split = true
//! min_chunks = 2
//! vendor_entities = ["jquery"]
//! ```
//!
//! Every key is optional. Relative paths resolve against the directory that
//! contains the configuration file (the project root).
//!
//! # Loading
//!
//! ```rust,no_run
//! use bemforge::config::ProjectConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! // Walks up from the current directory; falls back to defaults.
//! let config = ProjectConfig::discover(None)?;
//! for level in config.level_paths() {
//!     println!("layer: {}", level.display());
//! }
//! # Ok(())
//! # }
//! ```

mod parser;

pub use parser::parse_config;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILE_NAME, STATIC_DIR, TEMPLATES_DIR};
use crate::core::{BemForgeError, Technology};

/// Chunk splitting policy for style and behavior output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitChunks {
    /// Split style output into `common` and per-template groups.
    pub style_split: bool,
    /// Split behavior output into `common` and per-template groups.
    pub behavior_split: bool,
    /// Minimum number of referencing templates for an entity to go to `common`.
    pub min_chunks: usize,
    /// Entities flagged as vendor code in the bundle map.
    pub vendor_entities: BTreeSet<String>,
}

impl Default for SplitChunks {
    fn default() -> Self {
        Self {
            style_split: true,
            behavior_split: true,
            min_chunks: 2,
            vendor_entities: BTreeSet::new(),
        }
    }
}

impl SplitChunks {
    /// Whether splitting is enabled for the given bundled technology.
    ///
    /// Technologies that are never bundled report `false`.
    #[must_use]
    pub fn is_split(&self, technology: Technology) -> bool {
        match technology {
            Technology::Style => self.style_split,
            Technology::Behavior => self.behavior_split,
            _ => false,
        }
    }
}

/// Project configuration as written in `bemforge.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Override layers, lowest priority first.
    pub levels: Vec<PathBuf>,
    /// Source directory; page templates are read from `<src_dir>/templates`.
    pub src_dir: PathBuf,
    /// Output directory.
    pub out_dir: PathBuf,
    /// Chunk splitting policy.
    pub split_chunks: SplitChunks,
    /// Directory relative paths are resolved against. Not read from the file.
    #[serde(skip)]
    pub root: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            levels: vec![PathBuf::from("common.blocks"), PathBuf::from("src/blocks")],
            src_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("build"),
            split_chunks: SplitChunks::default(),
            root: PathBuf::from("."),
        }
    }
}

impl ProjectConfig {
    /// Load and validate a configuration file.
    ///
    /// The project root becomes the directory containing `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(BemForgeError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let mut config: Self = parse_config(path)?;
        config.root = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        config.validate()?;

        tracing::debug!(
            "Loaded {} with {} level(s), root {}",
            path.display(),
            config.levels.len(),
            config.root.display()
        );
        Ok(config)
    }

    /// Load `explicit` if given; otherwise search upward from the current
    /// directory for `bemforge.toml`, falling back to defaults rooted at the
    /// current directory.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let cwd = std::env::current_dir()?;
        match find_config(&cwd) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok(Self::with_root(cwd))
            }
        }
    }

    /// Default configuration rooted at `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), BemForgeError> {
        if self.levels.is_empty() {
            return Err(BemForgeError::ConfigValidation {
                reason: "at least one level is required".to_string(),
            });
        }
        if self.split_chunks.min_chunks < 1 {
            return Err(BemForgeError::ConfigValidation {
                reason: "split_chunks.min_chunks must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Override layer roots, resolved against the project root.
    #[must_use]
    pub fn level_paths(&self) -> Vec<PathBuf> {
        self.levels.iter().map(|level| self.resolve(level)).collect()
    }

    /// Highest-priority layer root, where new entities are scaffolded.
    #[must_use]
    pub fn last_level(&self) -> Option<PathBuf> {
        self.levels.last().map(|level| self.resolve(level))
    }

    /// Directory containing page templates.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.src_dir).join(TEMPLATES_DIR)
    }

    /// Directory whose files are copied verbatim to the output root.
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.templates_dir().join(STATIC_DIR)
    }

    /// Output directory.
    #[must_use]
    pub fn out_dir(&self) -> PathBuf {
        self.resolve(&self.out_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Search `start` and its ancestors for `bemforge.toml`.
#[must_use]
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::default();
        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.split_chunks.min_chunks, 2);
        assert!(config.split_chunks.style_split);
        assert!(config.split_chunks.behavior_split);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
levels = ["base", "project"]

[split_chunks]
behavior_split = false
vendor_entities = ["jquery"]
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.root, temp.path());
        assert_eq!(config.level_paths(), vec![temp.path().join("base"), temp.path().join("project")]);
        assert_eq!(config.last_level(), Some(temp.path().join("project")));
        assert!(config.split_chunks.style_split);
        assert!(!config.split_chunks.behavior_split);
        assert!(config.split_chunks.vendor_entities.contains("jquery"));
        assert_eq!(config.templates_dir(), temp.path().join("src").join("templates"));
        assert_eq!(config.static_dir(), temp.path().join("src/templates/static"));
        assert_eq!(config.out_dir(), temp.path().join("build"));
    }

    #[test]
    fn test_validation_rejects_zero_min_chunks() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[split_chunks]\nmin_chunks = 0\n").unwrap();

        let err = ProjectConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("min_chunks"));
    }

    #[test]
    fn test_validation_rejects_empty_levels() {
        let config = ProjectConfig {
            levels: Vec::new(),
            ..ProjectConfig::default()
        };
        assert!(matches!(config.validate(), Err(BemForgeError::ConfigValidation { .. })));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BemForgeError>(),
            Some(BemForgeError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_find_config_walks_up() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(temp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_is_split_per_technology() {
        let split = SplitChunks {
            style_split: false,
            ..SplitChunks::default()
        };
        assert!(!split.is_split(Technology::Style));
        assert!(split.is_split(Technology::Behavior));
        assert!(!split.is_split(Technology::Markup));
    }
}
