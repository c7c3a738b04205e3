//! Override layer resolution.
//!
//! Every layer root may hold a partial implementation of any entity. Text
//! technologies accumulate: each layer's file is appended after the previous
//! layer's. Image and font assets are discrete files, so a later layer's file
//! replaces an earlier one with the same file name.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::{EntityName, Technology};
use crate::utils::fs::{list_files, read_text_file};

/// Resolves entity files across an ordered list of layer roots.
#[derive(Debug, Clone)]
pub struct LayerResolver {
    levels: Vec<PathBuf>,
}

impl LayerResolver {
    /// Resolver over `levels`, lowest priority first.
    #[must_use]
    pub fn new(levels: Vec<PathBuf>) -> Self {
        Self {
            levels,
        }
    }

    /// Layer roots, lowest priority first.
    #[must_use]
    pub fn levels(&self) -> &[PathBuf] {
        &self.levels
    }

    /// Every existing file for each requested technology, in layer order.
    ///
    /// For text technologies this is one file per layer at most; for asset
    /// technologies it is every file of the asset directory on every layer.
    pub fn resolve(
        &self,
        name: &EntityName,
        technologies: &[Technology],
    ) -> Result<BTreeMap<Technology, Vec<PathBuf>>> {
        let mut resolved = BTreeMap::new();
        for &technology in technologies {
            let mut files = Vec::new();
            for level in &self.levels {
                files.extend(Self::files_on_level(name, technology, level)?);
            }
            resolved.insert(technology, files);
        }
        Ok(resolved)
    }

    /// Concatenated text of a text technology, `None` if no layer has a file.
    ///
    /// Each file contributes its contents followed by a newline.
    pub fn resolve_text(&self, name: &EntityName, technology: Technology) -> Result<Option<String>> {
        let files = self.resolve(name, &[technology])?.remove(&technology).unwrap_or_default();
        if files.is_empty() {
            return Ok(None);
        }

        let mut content = String::new();
        for file in &files {
            content.push_str(&read_text_file(file)?);
            content.push('\n');
        }
        tracing::trace!("Resolved {} {} from {} layer(s)", name, technology, files.len());
        Ok(Some(content))
    }

    /// Asset file name to source path; later layers win on equal names.
    pub fn resolve_assets(
        &self,
        name: &EntityName,
        technology: Technology,
    ) -> Result<BTreeMap<String, PathBuf>> {
        let mut assets = BTreeMap::new();
        for file in self.resolve(name, &[technology])?.remove(&technology).unwrap_or_default() {
            if let Some(file_name) = file.file_name().and_then(|n| n.to_str()) {
                assets.insert(file_name.to_string(), file);
            }
        }
        Ok(assets)
    }

    fn files_on_level(
        name: &EntityName,
        technology: Technology,
        level: &Path,
    ) -> Result<Vec<PathBuf>> {
        if let Some(ext) = technology.extension() {
            let path = name.file_path(level, ext);
            return Ok(if path.is_file() {
                vec![path]
            } else {
                Vec::new()
            });
        }

        match technology.asset_dir() {
            Some(dir) => list_files(&name.entity_dir(level).join(dir)),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn setup() -> (TempDir, LayerResolver) {
        let temp = TempDir::new().unwrap();
        let resolver = LayerResolver::new(vec![temp.path().join("A"), temp.path().join("B")]);
        (temp, resolver)
    }

    #[test]
    fn test_text_concatenates_in_layer_order() {
        let (temp, resolver) = setup();
        write(temp.path(), "A/x/x.css", "A-content");
        write(temp.path(), "B/x/x.css", "B-content");
        let name = EntityName::parse("x").unwrap();

        let style = resolver.resolve_text(&name, Technology::Style).unwrap();
        assert_eq!(style.as_deref(), Some("A-content\nB-content\n"));
    }

    #[test]
    fn test_missing_text_is_none() {
        let (_temp, resolver) = setup();
        let name = EntityName::parse("ghost").unwrap();
        assert_eq!(resolver.resolve_text(&name, Technology::Behavior).unwrap(), None);
    }

    #[test]
    fn test_assets_later_layer_wins() {
        let (temp, resolver) = setup();
        write(temp.path(), "A/logo/img/logo.png", "a");
        write(temp.path(), "A/logo/img/bg.png", "a");
        write(temp.path(), "B/logo/img/logo.png", "b");
        let name = EntityName::parse("logo").unwrap();

        let images = resolver.resolve_assets(&name, Technology::Images).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images["logo.png"], temp.path().join("B/logo/img/logo.png"));
        assert_eq!(images["bg.png"], temp.path().join("A/logo/img/bg.png"));
    }

    #[test]
    fn test_resolve_lists_per_technology() {
        let (temp, resolver) = setup();
        write(temp.path(), "B/menu/__item/menu__item.js", "js");
        write(temp.path(), "A/menu/__item/fonts/icons.woff", "font");
        let name = EntityName::parse("menu__item").unwrap();

        let resolved = resolver
            .resolve(&name, &[Technology::Behavior, Technology::Fonts, Technology::Markup])
            .unwrap();
        assert_eq!(resolved[&Technology::Behavior], vec![temp.path().join("B/menu/__item/menu__item.js")]);
        assert_eq!(resolved[&Technology::Fonts], vec![temp.path().join("A/menu/__item/fonts/icons.woff")]);
        assert!(resolved[&Technology::Markup].is_empty());
    }
}
