//! Bundle calculation.
//!
//! A bundle entry records which pages need an entity. The whole map is
//! recomputed from the current chains whenever anything changes; it is a
//! single pass over data that is already in memory.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::resolver::DependencyRef;

/// Pages referencing one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleEntry {
    /// Pages whose chain contains the entity
    pub referencing_templates: BTreeSet<String>,
    /// Whether the entity is configured as vendor code
    pub is_vendor: bool,
}

impl BundleEntry {
    /// Number of referencing pages.
    #[must_use]
    pub fn reference_count(&self) -> usize {
        self.referencing_templates.len()
    }
}

/// Bundle entries by entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BundleMap {
    entries: BTreeMap<String, BundleEntry>,
}

impl BundleMap {
    /// Build the map from every page's chain.
    ///
    /// ```rust
    /// use bemforge::bundle::BundleMap;
    /// use bemforge::resolver::{DependencyKind, DependencyRef};
    /// use std::collections::BTreeSet;
    ///
    /// let chain = vec![DependencyRef::new("jquery", DependencyKind::Explicit)];
    /// let vendor: BTreeSet<String> = ["jquery".to_string()].into();
    /// let bundles = BundleMap::calculate([("index", chain.as_slice())], &vendor);
    /// assert!(bundles.get("jquery").unwrap().is_vendor);
    /// ```
    pub fn calculate<'a, I>(chains: I, vendor_entities: &BTreeSet<String>) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [DependencyRef])>,
    {
        let mut entries: BTreeMap<String, BundleEntry> = BTreeMap::new();
        for (template, chain) in chains {
            for dep in chain {
                let entry = entries.entry(dep.name.clone()).or_default();
                entry.referencing_templates.insert(template.to_string());
                entry.is_vendor = vendor_entities.contains(&dep.name);
            }
        }
        Self {
            entries,
        }
    }

    /// Whether any page references `name`.
    #[must_use]
    pub fn is_in_bundle(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entry for `name`, if referenced.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BundleEntry> {
        self.entries.get(name)
    }

    /// Entries ordered by entity name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BundleEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Referenced entities flagged as vendor code.
    pub fn vendor_entities(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, entry)| entry.is_vendor).map(|(name, _)| name)
    }

    /// Number of referenced entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entity is referenced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::DependencyKind;

    fn chain(names: &[&str]) -> Vec<DependencyRef> {
        names.iter().map(|n| DependencyRef::new(*n, DependencyKind::Implicit)).collect()
    }

    #[test]
    fn test_referencing_templates_are_collected() {
        let index = chain(&["header", "button"]);
        let about = chain(&["header", "text"]);
        let bundles = BundleMap::calculate(
            [("index", index.as_slice()), ("about", about.as_slice())],
            &BTreeSet::new(),
        );

        assert_eq!(bundles.len(), 3);
        assert_eq!(bundles.get("header").unwrap().reference_count(), 2);
        assert_eq!(
            bundles.get("button").unwrap().referencing_templates,
            BTreeSet::from(["index".to_string()])
        );
        assert!(!bundles.is_in_bundle("footer"));
        assert_eq!(bundles.vendor_entities().count(), 0);
    }

    #[test]
    fn test_vendor_flag_regardless_of_references() {
        let index = chain(&["jquery", "app"]);
        let vendor = BTreeSet::from(["jquery".to_string(), "unused".to_string()]);
        let bundles = BundleMap::calculate([("index", index.as_slice())], &vendor);

        assert!(bundles.get("jquery").unwrap().is_vendor);
        assert!(!bundles.get("app").unwrap().is_vendor);
        assert_eq!(bundles.vendor_entities().collect::<Vec<_>>(), vec!["jquery"]);
        // Vendor entities nobody references stay out of the map
        assert!(!bundles.is_in_bundle("unused"));
    }

    #[test]
    fn test_no_templates_no_entries() {
        let bundles = BundleMap::calculate(std::iter::empty(), &BTreeSet::new());
        assert!(bundles.is_empty());
    }
}
