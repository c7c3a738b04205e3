//! Build pipeline.
//!
//! [`BuildPipeline`] owns all build state: the project configuration, the
//! entity store, the loaded page templates with their chains, the current
//! bundle map and the markup renderer. A full build runs
//!
//! ```text
//! Idle -> Extracting -> Materializing -> ChainBuilding -> BundleCalculating -> Rendering -> Idle
//! ```
//!
//! and a file change re-enters at the narrowest step it affects (one page,
//! or one technology of one entity) before recalculating bundles and
//! re-rendering the affected output. Everything runs to completion on the
//! caller's thread; events are expected one at a time.
//!
//! The pipeline only computes results. [`OutputWriter`] puts a
//! [`BuildUpdate`] on disk.
//!
//! ```rust,no_run
//! use bemforge::config::ProjectConfig;
//! use bemforge::pipeline::{BuildPipeline, ChangeEvent, OutputWriter};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ProjectConfig::discover(None)?;
//! let writer = OutputWriter::new(config.out_dir());
//! let mut pipeline = BuildPipeline::new(config);
//!
//! writer.apply(&pipeline.full_build()?)?;
//!
//! // Later, when a watcher reports a change:
//! let update = pipeline.handle_event(&ChangeEvent::changed("src/blocks/header/header.css"))?;
//! writer.apply(&update)?;
//! # Ok(())
//! # }
//! ```

mod events;
mod includes;
pub mod output;

pub use events::{ChangeEvent, ChangeKind, ChangeTarget, classify};
pub use includes::StoreIncludeResolver;
pub use output::{OutputWriter, WriteSummary};

use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::bundle::{BundleMap, OutputGroups, SplitPolicy, split_chunks};
use crate::config::ProjectConfig;
use crate::constants::MARKUP_EXTENSION;
use crate::core::{BemForgeError, Technology};
use crate::resolver::{
    DependencyRef, EntityStore, LayerResolver, build_chain, extract_dependencies,
};
use crate::templating::{MarkupRenderer, TeraRenderer, import_prelude, tokenize};
use crate::utils::fs::{list_files, list_files_matching, read_text_file};

/// Step of the build cycle the pipeline is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Waiting for work
    Idle,
    /// Extracting dependencies from markup
    Extracting,
    /// Resolving entities from the layers
    Materializing,
    /// Linearizing page chains
    ChainBuilding,
    /// Recomputing the bundle map
    BundleCalculating,
    /// Rendering pages or output groups
    Rendering,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildPhase::Idle => "idle",
            BuildPhase::Extracting => "extracting",
            BuildPhase::Materializing => "materializing",
            BuildPhase::ChainBuilding => "chain-building",
            BuildPhase::BundleCalculating => "bundle-calculating",
            BuildPhase::Rendering => "rendering",
        };
        f.write_str(name)
    }
}

/// A page template and its resolved chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Page name (file stem)
    pub name: String,
    /// Source file
    pub path: PathBuf,
    /// Raw markup
    pub source: String,
    /// References found in the page's own markup
    pub dependencies: Vec<DependencyRef>,
    /// Every entity the page needs, dependencies first
    pub chain: Vec<DependencyRef>,
}

/// An image or font to copy into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCopy {
    /// Images or fonts
    pub technology: Technology,
    /// Output file name
    pub file_name: String,
    /// Winning source file across the layers
    pub source: PathBuf,
}

/// An image or font no layer provides anymore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRemoval {
    /// Images or fonts
    pub technology: Technology,
    /// Output file name
    pub file_name: String,
}

/// Output produced by a build step.
///
/// `None` for styles or behaviors means that technology was not re-rendered;
/// `Some` replaces every group of that technology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildUpdate {
    /// Rendered pages by name
    pub pages: BTreeMap<String, String>,
    /// Pages whose template was deleted
    pub removed_pages: Vec<String>,
    /// Style groups
    pub styles: Option<OutputGroups>,
    /// Behavior groups
    pub behaviors: Option<OutputGroups>,
    /// Assets to copy
    pub assets: Vec<AssetCopy>,
    /// Assets to delete
    pub removed_assets: Vec<AssetRemoval>,
    /// Static files to copy to the output root
    pub static_files: Vec<PathBuf>,
    /// Static files to delete from the output root
    pub removed_static: Vec<String>,
}

impl BuildUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Build controller owning all build state.
pub struct BuildPipeline {
    config: ProjectConfig,
    store: EntityStore,
    templates: BTreeMap<String, Template>,
    bundles: BundleMap,
    renderer: Box<dyn MarkupRenderer>,
    phase: BuildPhase,
}

impl fmt::Debug for BuildPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildPipeline")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("entities", &self.store.len())
            .field("bundled", &self.bundles.len())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl BuildPipeline {
    /// Pipeline rendering markup with [`TeraRenderer`].
    #[must_use]
    pub fn new(config: ProjectConfig) -> Self {
        Self::with_renderer(config, Box::new(TeraRenderer::new()))
    }

    /// Pipeline with a custom markup renderer.
    #[must_use]
    pub fn with_renderer(config: ProjectConfig, renderer: Box<dyn MarkupRenderer>) -> Self {
        let store = EntityStore::new(LayerResolver::new(config.level_paths()));
        Self {
            config,
            store,
            templates: BTreeMap::new(),
            bundles: BundleMap::default(),
            renderer,
            phase: BuildPhase::Idle,
        }
    }

    /// Project configuration.
    #[must_use]
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Entity store.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Current bundle map.
    #[must_use]
    pub fn bundles(&self) -> &BundleMap {
        &self.bundles
    }

    /// Loaded page templates by name.
    #[must_use]
    pub fn templates(&self) -> &BTreeMap<String, Template> {
        &self.templates
    }

    /// Current build phase.
    #[must_use]
    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    fn enter(&mut self, phase: BuildPhase) {
        if self.phase != phase {
            tracing::debug!("Build phase: {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Load every page template from the templates directory.
    pub fn load_templates(&mut self) -> Result<usize> {
        let dir = self.config.templates_dir();
        let paths = list_files_matching(&dir, &format!("*.{MARKUP_EXTENSION}"))?;
        for path in &paths {
            self.build_template(path)?;
        }
        tracing::debug!("Loaded {} template(s) from {}", paths.len(), dir.display());
        Ok(paths.len())
    }

    /// Read a page template, extract its dependencies and build its chain.
    ///
    /// Replaces a previously loaded template of the same name.
    pub fn build_template(&mut self, path: &Path) -> Result<&Template> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow!("Invalid template file name: {}", path.display()))?
            .to_string();
        let source = read_text_file(path)?;

        self.enter(BuildPhase::Extracting);
        let dependencies = extract_dependencies(&tokenize(&source));

        let chain = match self.resolve_chain(&dependencies) {
            Ok(chain) => chain,
            Err(e) => {
                self.enter(BuildPhase::Idle);
                return Err(e);
            }
        };
        self.enter(BuildPhase::Idle);

        tracing::debug!(
            "Template {}: {} direct, {} chained dependencies",
            name,
            dependencies.len(),
            chain.len()
        );
        self.templates.insert(
            name.clone(),
            Template {
                name: name.clone(),
                path: path.to_path_buf(),
                source,
                dependencies,
                chain,
            },
        );
        Ok(&self.templates[&name])
    }

    fn resolve_chain(&mut self, dependencies: &[DependencyRef]) -> Result<Vec<DependencyRef>> {
        self.enter(BuildPhase::Materializing);
        for dep in dependencies {
            self.store.materialize(&dep.name)?;
        }
        self.enter(BuildPhase::ChainBuilding);
        build_chain(&mut self.store, dependencies)
    }

    /// Recompute a loaded page's chain from its first-level dependencies.
    fn rechain(&mut self, name: &str) -> Result<()> {
        let Some(dependencies) = self.templates.get(name).map(|t| t.dependencies.clone()) else {
            return Ok(());
        };
        let chain = self.resolve_chain(&dependencies);
        self.enter(BuildPhase::Idle);
        if let Some(template) = self.templates.get_mut(name) {
            template.chain = chain?;
        }
        Ok(())
    }

    /// Forget a page template.
    pub fn unlink_template(&mut self, name: &str) -> Option<Template> {
        let removed = self.templates.remove(name);
        if removed.is_some() {
            tracing::debug!("Unlinked template {}", name);
        }
        removed
    }

    /// Page markup as handed to the renderer: an import for every implicit
    /// chain member with markup, then the page's own source.
    pub fn page_source(&self, name: &str) -> Result<String, BemForgeError> {
        let template = self.templates.get(name).ok_or_else(|| BemForgeError::TemplateNotFound {
            name: name.to_string(),
        })?;

        let imports = template
            .chain
            .iter()
            .filter(|dep| dep.is_implicit())
            .filter(|dep| self.store.get(&dep.name).is_some_and(|entity| entity.markup.is_some()))
            .map(|dep| dep.name.as_str());

        Ok(format!("{}{}", import_prelude(imports), template.source))
    }

    /// Render one page.
    pub fn render_template(&mut self, name: &str) -> Result<String> {
        self.enter(BuildPhase::Rendering);
        let result = self.render_page(name);
        self.enter(BuildPhase::Idle);
        result
    }

    /// Render every loaded page.
    pub fn render_templates(&mut self) -> Result<BTreeMap<String, String>> {
        self.enter(BuildPhase::Rendering);
        let mut pages = BTreeMap::new();
        for name in self.templates.keys() {
            match self.render_page(name) {
                Ok(html) => {
                    pages.insert(name.clone(), html);
                }
                Err(e) => {
                    self.phase = BuildPhase::Idle;
                    return Err(e);
                }
            }
        }
        self.enter(BuildPhase::Idle);
        Ok(pages)
    }

    fn render_page(&self, name: &str) -> Result<String> {
        let source = self.page_source(name)?;
        let includes = StoreIncludeResolver::new(&self.store);
        self.renderer.render(name, &source, &includes).map_err(|source| {
            anyhow::Error::from(BemForgeError::TemplateRender {
                name: name.to_string(),
                source,
            })
        })
    }

    /// Recompute the bundle map from every page's chain.
    pub fn calculate_bundles(&mut self) {
        self.enter(BuildPhase::BundleCalculating);
        self.bundles = BundleMap::calculate(
            self.templates.iter().map(|(name, template)| (name.as_str(), template.chain.as_slice())),
            &self.config.split_chunks.vendor_entities,
        );
        tracing::debug!("Bundle map covers {} entities", self.bundles.len());
        self.enter(BuildPhase::Idle);
    }

    /// Style output groups under the configured policy.
    pub fn render_styles(&mut self) -> OutputGroups {
        self.render_groups(Technology::Style)
    }

    /// Behavior output groups under the configured policy.
    pub fn render_behaviors(&mut self) -> OutputGroups {
        self.render_groups(Technology::Behavior)
    }

    fn render_groups(&mut self, technology: Technology) -> OutputGroups {
        self.enter(BuildPhase::Rendering);
        let policy = SplitPolicy::for_technology(&self.config.split_chunks, technology);
        let groups = split_chunks(&self.store, &self.bundles, technology, policy);
        self.enter(BuildPhase::Idle);
        groups
    }

    /// A single entity's output for `technology`, keyed by its name.
    #[must_use]
    pub fn render_entity(&self, technology: Technology, name: &str) -> OutputGroups {
        crate::bundle::render_entity(&self.store, technology, name)
    }

    /// Re-resolve one technology of one entity.
    pub fn rebuild_entity(&mut self, name: &str, technology: Technology) -> Result<()> {
        self.enter(if technology == Technology::Markup {
            BuildPhase::Extracting
        } else {
            BuildPhase::Materializing
        });
        let result = self.store.rebuild(name, technology).map(|_| ());
        self.enter(BuildPhase::Idle);
        result
    }

    /// Pages whose chain contains `name`.
    #[must_use]
    pub fn templates_by_entity(&self, name: &str) -> Vec<String> {
        self.templates
            .values()
            .filter(|template| template.chain.iter().any(|dep| dep.name == name))
            .map(|template| template.name.clone())
            .collect()
    }

    /// Whether any page needs `name`.
    #[must_use]
    pub fn is_entity_in_bundle(&self, name: &str) -> bool {
        self.bundles.is_in_bundle(name)
    }

    /// Whether `name` was resolved and has content.
    #[must_use]
    pub fn is_entity_exists(&self, name: &str) -> bool {
        self.store.exists(name)
    }

    /// Images and fonts of every bundled entity.
    #[must_use]
    pub fn bundled_assets(&self) -> Vec<AssetCopy> {
        let mut assets = Vec::new();
        for (name, _) in self.bundles.iter() {
            let Some(entity) = self.store.get(name) else {
                continue;
            };
            for technology in [Technology::Images, Technology::Fonts] {
                for (file_name, source) in entity.assets(technology).into_iter().flatten() {
                    assets.push(AssetCopy {
                        technology,
                        file_name: file_name.clone(),
                        source: source.clone(),
                    });
                }
            }
        }
        assets
    }

    /// Files in the static directory.
    pub fn static_files(&self) -> Result<Vec<PathBuf>> {
        list_files(&self.config.static_dir())
    }

    /// Load everything and render all output.
    ///
    /// Page render failures abort the build.
    pub fn full_build(&mut self) -> Result<BuildUpdate> {
        let count = self.load_templates()?;
        tracing::info!("Building {} page(s)", count);

        self.calculate_bundles();
        let pages = self.render_templates()?;
        let styles = self.render_styles();
        let behaviors = self.render_behaviors();

        Ok(BuildUpdate {
            pages,
            styles: Some(styles),
            behaviors: Some(behaviors),
            assets: self.bundled_assets(),
            static_files: self.static_files()?,
            ..BuildUpdate::default()
        })
    }

    /// Apply one file change and return the output it affects.
    ///
    /// Page render failures are logged and leave the page out of the update.
    pub fn handle_event(&mut self, event: &ChangeEvent) -> Result<BuildUpdate> {
        let target = classify(&self.config, &event.path);
        tracing::debug!("{:?} {} -> {:?}", event.kind, event.path.display(), target);

        match target {
            ChangeTarget::Page(name) => self.on_page(event.kind, &event.path, &name),
            ChangeTarget::Static => Ok(on_static(event)),
            ChangeTarget::EntityFile {
                entity,
                technology,
            } => self.on_entity_file(&entity, technology),
            ChangeTarget::EntityAsset {
                entity_dir,
                technology,
            } => self.on_entity_asset(&entity_dir, technology, &event.path),
            ChangeTarget::Unrelated => Ok(BuildUpdate::default()),
        }
    }

    fn on_page(&mut self, kind: ChangeKind, path: &Path, name: &str) -> Result<BuildUpdate> {
        let mut update = BuildUpdate::default();
        match kind {
            ChangeKind::Removed => {
                if self.unlink_template(name).is_some() {
                    update.removed_pages.push(name.to_string());
                }
            }
            ChangeKind::Added | ChangeKind::Changed => {
                self.build_template(path)?;
                self.render_into(&mut update, name);
            }
        }

        self.refresh_bundled_output(&mut update);
        Ok(update)
    }

    fn on_entity_file(&mut self, entity: &str, technology: Technology) -> Result<BuildUpdate> {
        let mut update = BuildUpdate::default();
        if !self.is_entity_in_bundle(entity) {
            tracing::debug!("Ignoring {} change of {}: no page uses it", technology, entity);
            return Ok(update);
        }

        self.rebuild_entity(entity, technology)?;
        match technology {
            Technology::Markup => {
                for page in self.templates_by_entity(entity) {
                    self.rechain(&page)?;
                    self.render_into(&mut update, &page);
                }
                self.refresh_bundled_output(&mut update);
            }
            Technology::Style => {
                self.calculate_bundles();
                update.styles = Some(self.render_styles());
            }
            Technology::Behavior => {
                self.calculate_bundles();
                update.behaviors = Some(self.render_behaviors());
            }
            Technology::Images | Technology::Fonts => {}
        }
        Ok(update)
    }

    fn on_entity_asset(
        &mut self,
        entity_dir: &Path,
        technology: Technology,
        path: &Path,
    ) -> Result<BuildUpdate> {
        let mut update = BuildUpdate::default();
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return Ok(update);
        };

        for entity in self.store.entities_in_dir(entity_dir) {
            if !self.is_entity_in_bundle(&entity) {
                tracing::debug!("Ignoring {} change of {}: no page uses it", technology, entity);
                continue;
            }
            self.rebuild_entity(&entity, technology)?;

            let winner = self
                .store
                .get(&entity)
                .and_then(|e| e.assets(technology))
                .and_then(|assets| assets.get(file_name));
            match winner {
                Some(source) => update.assets.push(AssetCopy {
                    technology,
                    file_name: file_name.to_string(),
                    source: source.clone(),
                }),
                None => update.removed_assets.push(AssetRemoval {
                    technology,
                    file_name: file_name.to_string(),
                }),
            }
        }
        Ok(update)
    }

    fn render_into(&mut self, update: &mut BuildUpdate, name: &str) {
        match self.render_template(name) {
            Ok(html) => {
                update.pages.insert(name.to_string(), html);
            }
            Err(e) => tracing::error!("Failed to render page {}: {:#}", name, e),
        }
    }

    /// Re-bundle, then re-render both bundled technologies and list assets.
    fn refresh_bundled_output(&mut self, update: &mut BuildUpdate) {
        self.calculate_bundles();
        update.styles = Some(self.render_styles());
        update.behaviors = Some(self.render_behaviors());
        update.assets = self.bundled_assets();
    }
}

fn on_static(event: &ChangeEvent) -> BuildUpdate {
    let mut update = BuildUpdate::default();
    match event.kind {
        ChangeKind::Removed => {
            if let Some(name) = event.path.file_name().and_then(|n| n.to_str()) {
                update.removed_static.push(name.to_string());
            }
        }
        ChangeKind::Added | ChangeKind::Changed => update.static_files.push(event.path.clone()),
    }
    update
}
