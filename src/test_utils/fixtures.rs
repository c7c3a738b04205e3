//! On-disk project fixtures.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::ProjectConfig;
use crate::constants::{CONFIG_FILE_NAME, MARKUP_EXTENSION, STATIC_DIR, TEMPLATES_DIR};
use crate::core::{EntityName, Technology};

/// A throwaway project directory with the default layout.
///
/// Builder methods consume and return the fixture so a project reads top to
/// bottom:
///
/// ```rust,no_run
/// use bemforge::test_utils::ProjectFixture;
///
/// # fn example() -> anyhow::Result<()> {
/// let project = ProjectFixture::new()?
///     .config("out_dir = \"dist\"")?
///     .entity("src/blocks", "menu__item", "css", ".menu__item{}")?
///     .asset("src/blocks", "logo", "img", "logo.png", "png")?
///     .page("index", "<ul class=\"menu__item\"></ul>")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ProjectFixture {
    temp: TempDir,
}

impl ProjectFixture {
    /// Empty project without a config file.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// A small site: two pages sharing `header`, one using `button`.
    pub fn sample() -> Result<Self> {
        Self::new()?
            .entity("common.blocks", "header", "css", ".header{}")?
            .entity("src/blocks", "header", "css", ".header{color:red}")?
            .entity("common.blocks", "header", "js", "initHeader();")?
            .entity(
                "common.blocks",
                "button",
                "html",
                "{% macro button(text) %}<button class=\"button\">{{ text }}</button>{% endmacro %}",
            )?
            .entity("common.blocks", "button", "css", ".button{}")?
            .asset("src/blocks", "header", "img", "logo.png", "png")?
            .page("index", "<div class=\"header\">{{ button::button(text=\"Go\") }}</div>")?
            .page("about", "<div class=\"header\"></div>")
    }

    /// Project root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Configuration as the build would load it.
    pub fn project_config(&self) -> Result<ProjectConfig> {
        let path = self.path().join(CONFIG_FILE_NAME);
        if path.is_file() {
            ProjectConfig::load(&path)
        } else {
            Ok(ProjectConfig::with_root(self.path()))
        }
    }

    /// Write `bemforge.toml`.
    pub fn config(self, toml: &str) -> Result<Self> {
        self.file(CONFIG_FILE_NAME, toml)
    }

    /// Write one technology file of an entity on `level`.
    pub fn entity(self, level: &str, name: &str, technology: &str, content: &str) -> Result<Self> {
        let path = self.entity_file(level, name, technology)?;
        write(&path, content)?;
        Ok(self)
    }

    /// Write an image or font of an entity on `level`.
    pub fn asset(
        self,
        level: &str,
        name: &str,
        technology: &str,
        file_name: &str,
        content: &str,
    ) -> Result<Self> {
        let technology: Technology = technology.parse()?;
        let dir = technology
            .asset_dir()
            .with_context(|| format!("{technology} is not an asset technology"))?;
        let path = EntityName::parse(name)?.entity_dir(&self.path().join(level)).join(dir).join(file_name);
        write(&path, content)?;
        Ok(self)
    }

    /// Write a page template.
    pub fn page(self, name: &str, content: &str) -> Result<Self> {
        let rel = format!("src/{TEMPLATES_DIR}/{name}.{MARKUP_EXTENSION}");
        self.file(&rel, content)
    }

    /// Write a static template file.
    pub fn static_file(self, name: &str, content: &str) -> Result<Self> {
        let rel = format!("src/{TEMPLATES_DIR}/{STATIC_DIR}/{name}");
        self.file(&rel, content)
    }

    /// Write any file relative to the root.
    pub fn file(self, rel: &str, content: &str) -> Result<Self> {
        write(&self.path().join(rel), content)?;
        Ok(self)
    }

    /// Path of an entity's technology file on `level`.
    pub fn entity_file(&self, level: &str, name: &str, technology: &str) -> Result<PathBuf> {
        let technology: Technology = technology.parse()?;
        let ext = technology
            .extension()
            .with_context(|| format!("{technology} has no source file"))?;
        Ok(EntityName::parse(name)?.file_path(&self.path().join(level), ext))
    }

    /// Read a file relative to the root.
    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.path().join(rel);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
