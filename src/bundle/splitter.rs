//! Chunk splitting of style and behavior output.
//!
//! With splitting off, every entity's content goes into one `main` group.
//! With splitting on, an entity referenced by at least `min_chunks` pages goes
//! into the shared `common` group; anything less widely used is copied into
//! the group of each page that needs it, keeping one-off code out of the
//! shared file.

use std::collections::BTreeMap;

use super::calculator::BundleMap;
use crate::config::SplitChunks;
use crate::constants::{COMMON_GROUP, MAIN_GROUP};
use crate::core::Technology;
use crate::resolver::EntityStore;

/// Output group name to concatenated content.
pub type OutputGroups = BTreeMap<String, String>;

/// Splitting policy for one technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Whether to split into `common` and per-page groups
    pub enabled: bool,
    /// References needed to land in `common`
    pub min_chunks: usize,
}

impl SplitPolicy {
    /// Policy configured for `technology`.
    #[must_use]
    pub fn for_technology(config: &SplitChunks, technology: Technology) -> Self {
        Self {
            enabled: config.is_split(technology),
            min_chunks: config.min_chunks,
        }
    }
}

/// Group every entity's `technology` content according to `policy`.
///
/// Entities are visited in store order, so group contents follow the order
/// in which entities were first resolved.
#[must_use]
pub fn split_chunks(
    store: &EntityStore,
    bundles: &BundleMap,
    technology: Technology,
    policy: SplitPolicy,
) -> OutputGroups {
    let mut groups = OutputGroups::new();

    for entity in store.iter() {
        let Some(content) = entity.text(technology).filter(|content| !content.is_empty()) else {
            continue;
        };

        if !policy.enabled {
            let main = groups.entry(MAIN_GROUP.to_string()).or_default();
            main.push_str(content);
            main.push('\n');
            continue;
        }

        let Some(entry) = bundles.get(&entity.name) else {
            continue;
        };

        if entry.reference_count() >= policy.min_chunks {
            groups.entry(COMMON_GROUP.to_string()).or_default().push_str(content);
        } else {
            for template in &entry.referencing_templates {
                groups.entry(template.clone()).or_default().push_str(content);
            }
        }
    }

    tracing::debug!("Split {} into {} group(s)", technology, groups.len());
    groups
}

/// One entity's `technology` content keyed by its own name.
///
/// Missing entities and missing content give an empty string.
#[must_use]
pub fn render_entity(store: &EntityStore, technology: Technology, name: &str) -> OutputGroups {
    let content = store
        .get(name)
        .and_then(|entity| entity.text(technology))
        .map(|content| format!("{content}\n"))
        .unwrap_or_default();
    OutputGroups::from([(name.to_string(), content)])
}
