//! Include resolution backed by the entity store.

use strsim::levenshtein;

use crate::resolver::EntityStore;
use crate::templating::IncludeResolver;

/// Maximum edit distance for a suggestion, as a percentage of the name length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Serves entity markup to the renderer straight from the store.
///
/// Unknown or empty entities resolve to an empty template and are logged
/// with the closest known entity name, if one is close enough.
pub struct StoreIncludeResolver<'a> {
    store: &'a EntityStore,
}

impl<'a> StoreIncludeResolver<'a> {
    /// Resolver over `store`.
    #[must_use]
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
        }
    }

    fn suggest(&self, name: &str) -> Option<&'a str> {
        let store = self.store;
        store
            .iter()
            .filter(|entity| entity.exists() && entity.name != name)
            .map(|entity| (entity.name.as_str(), levenshtein(name, &entity.name)))
            .filter(|(_, distance)| *distance <= name.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .min_by_key(|(_, distance)| *distance)
            .map(|(candidate, _)| candidate)
    }
}

impl IncludeResolver for StoreIncludeResolver<'_> {
    fn resolve_include(&self, name: &str) -> String {
        match self.store.get(name) {
            Some(entity) if entity.exists() => entity.markup.clone().unwrap_or_default(),
            _ => {
                match self.suggest(name) {
                    Some(candidate) => tracing::error!(
                        "Cannot include '{}': entity not found (did you mean '{}'?)",
                        name,
                        candidate
                    ),
                    None => tracing::error!("Cannot include '{}': entity not found", name),
                }
                String::new()
            }
        }
    }
}
