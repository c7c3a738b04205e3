//! Memoized entity storage.
//!
//! The store resolves each entity at most once. An entity that was looked up
//! but has no content on any layer keeps its slot, so repeated references (and
//! reference cycles) never hit the file system twice. Only [`EntityStore::rebuild`]
//! refreshes an entity, one technology at a time.

use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use super::extractor::{DependencyRef, extract_dependencies};
use super::layers::LayerResolver;
use crate::core::{EntityName, Technology};
use crate::templating::{apply_private_scope, tokenize};

/// A resolved entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    /// Entity name
    pub name: String,
    /// Layer-merged markup with private macros scoped
    pub markup: Option<String>,
    /// Layer-concatenated style source
    pub style: Option<String>,
    /// Layer-concatenated behavior source
    pub behavior: Option<String>,
    /// Image file name to source path
    pub images: BTreeMap<String, PathBuf>,
    /// Font file name to source path
    pub fonts: BTreeMap<String, PathBuf>,
    /// References found in the markup; `None` without markup
    pub dependencies: Option<Vec<DependencyRef>>,
}

impl Entity {
    /// An entity with no content.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// An entity exists if any technology has content.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.markup.is_some()
            || self.style.is_some()
            || self.behavior.is_some()
            || !self.images.is_empty()
            || !self.fonts.is_empty()
    }

    /// Text content of a text technology.
    #[must_use]
    pub fn text(&self, technology: Technology) -> Option<&str> {
        match technology {
            Technology::Markup => self.markup.as_deref(),
            Technology::Style => self.style.as_deref(),
            Technology::Behavior => self.behavior.as_deref(),
            Technology::Images | Technology::Fonts => None,
        }
    }

    /// Asset map of an asset technology.
    #[must_use]
    pub fn assets(&self, technology: Technology) -> Option<&BTreeMap<String, PathBuf>> {
        match technology {
            Technology::Images => Some(&self.images),
            Technology::Fonts => Some(&self.fonts),
            _ => None,
        }
    }

    /// First-level dependencies, empty without markup.
    #[must_use]
    pub fn dependencies(&self) -> &[DependencyRef] {
        self.dependencies.as_deref().unwrap_or_default()
    }

    /// Technologies this entity has content for.
    #[must_use]
    pub fn technologies(&self) -> Vec<Technology> {
        let mut techs: Vec<Technology> =
            Technology::TEXT.into_iter().filter(|tech| self.text(*tech).is_some()).collect();
        techs.extend(
            [Technology::Images, Technology::Fonts]
                .into_iter()
                .filter(|tech| self.assets(*tech).is_some_and(|assets| !assets.is_empty())),
        );
        techs
    }
}

/// Insertion-ordered store of every entity looked up so far.
#[derive(Debug)]
pub struct EntityStore {
    resolver: LayerResolver,
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl EntityStore {
    /// Empty store resolving through `resolver`.
    #[must_use]
    pub fn new(resolver: LayerResolver) -> Self {
        Self {
            resolver,
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Layer resolver backing the store.
    #[must_use]
    pub fn resolver(&self) -> &LayerResolver {
        &self.resolver
    }

    /// Resolve `name` unless it was resolved before, and return it.
    ///
    /// Dependencies are not followed. An invalid or missing entity is stored
    /// as empty and logged.
    pub fn materialize(&mut self, name: &str) -> Result<&Entity> {
        if let Some(&idx) = self.index.get(name) {
            return Ok(&self.entities[idx]);
        }

        let entity = self.load(name)?;
        if !entity.exists() {
            tracing::warn!("Entity '{}' not found on any level", name);
        }

        let idx = self.entities.len();
        self.entities.push(entity);
        self.index.insert(name.to_string(), idx);
        Ok(&self.entities[idx])
    }

    /// Re-resolve a single technology of an entity.
    ///
    /// Other technologies are left as they are. Rebuilding markup also
    /// re-extracts the entity's dependencies.
    pub fn rebuild(&mut self, name: &str, technology: Technology) -> Result<&Entity> {
        let Some(&idx) = self.index.get(name) else {
            return self.materialize(name);
        };

        if let Ok(parsed) = EntityName::parse(name) {
            let entity = &mut self.entities[idx];
            match technology {
                Technology::Markup => {
                    let (markup, dependencies) = load_markup(&self.resolver, &parsed)?;
                    entity.markup = markup;
                    entity.dependencies = dependencies;
                }
                Technology::Style | Technology::Behavior => {
                    let text = self.resolver.resolve_text(&parsed, technology)?;
                    if technology == Technology::Style {
                        entity.style = text;
                    } else {
                        entity.behavior = text;
                    }
                }
                Technology::Images => {
                    entity.images = self.resolver.resolve_assets(&parsed, technology)?;
                }
                Technology::Fonts => {
                    entity.fonts = self.resolver.resolve_assets(&parsed, technology)?;
                }
            }
            tracing::debug!("Rebuilt {} of {}", technology, name);
        }

        Ok(&self.entities[idx])
    }

    /// A previously materialized entity.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&idx| &self.entities[idx])
    }

    /// Whether `name` has been looked up before.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether `name` has been looked up and has content.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some_and(Entity::exists)
    }

    /// Entities in the order they were first looked up.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities looked up so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing has been looked up yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Materialized entities whose directory on some level is `dir`.
    ///
    /// Used to map an image or font change back to its entity.
    #[must_use]
    pub fn entities_in_dir(&self, dir: &Path) -> Vec<String> {
        self.entities
            .iter()
            .filter(|entity| {
                EntityName::parse(&entity.name).is_ok_and(|parsed| {
                    self.resolver.levels().iter().any(|level| parsed.entity_dir(level) == dir)
                })
            })
            .map(|entity| entity.name.clone())
            .collect()
    }

    fn load(&self, name: &str) -> Result<Entity> {
        let parsed = match EntityName::parse(name) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("{e}");
                return Ok(Entity::empty(name));
            }
        };

        let (markup, dependencies) = load_markup(&self.resolver, &parsed)?;
        Ok(Entity {
            name: name.to_string(),
            markup,
            style: self.resolver.resolve_text(&parsed, Technology::Style)?,
            behavior: self.resolver.resolve_text(&parsed, Technology::Behavior)?,
            images: self.resolver.resolve_assets(&parsed, Technology::Images)?,
            fonts: self.resolver.resolve_assets(&parsed, Technology::Fonts)?,
            dependencies,
        })
    }
}

/// Scoped markup and the dependencies found in it.
///
/// Dependencies come from the unscoped source, where private names still
/// carry their leading underscore.
fn load_markup(
    resolver: &LayerResolver,
    name: &EntityName,
) -> Result<(Option<String>, Option<Vec<DependencyRef>>)> {
    let Some(raw) = resolver.resolve_text(name, Technology::Markup)? else {
        return Ok((None, None));
    };

    let dependencies = extract_dependencies(&tokenize(&raw));
    let markup = apply_private_scope(&name.to_string(), &raw);
    Ok((Some(markup), Some(dependencies)))
}
