//! Dependency chain linearization.
//!
//! A chain lists every entity a page needs, once, with each entity placed
//! after everything it depends on. Two depth-first passes run over the
//! store:
//!
//! 1. A forward pass materializes entities as they are reached. A name is
//!    claimed the first time it is seen, which fixes its reference kind and
//!    stops cycles.
//! 2. A post-order pass walks each sibling list in reverse, so among
//!    independent siblings the one discovered last comes first.

use anyhow::Result;
use std::collections::{HashMap, HashSet};

use super::entity_store::EntityStore;
use super::extractor::{DependencyKind, DependencyRef};

/// Linearize the transitive closure of `first_level`.
///
/// ```rust,no_run
/// use bemforge::resolver::{
///     DependencyKind, DependencyRef, EntityStore, LayerResolver, build_chain,
/// };
/// use std::path::PathBuf;
///
/// # fn example() -> anyhow::Result<()> {
/// let mut store = EntityStore::new(LayerResolver::new(vec![PathBuf::from("blocks")]));
/// let chain = build_chain(&mut store, &[DependencyRef::new("page", DependencyKind::Implicit)])?;
/// for dep in &chain {
///     println!("{} ({})", dep.name, dep.kind);
/// }
/// # Ok(())
/// # }
/// ```
pub fn build_chain(store: &mut EntityStore, first_level: &[DependencyRef]) -> Result<Vec<DependencyRef>> {
    let mut claimed = HashMap::new();
    claim(store, first_level, &mut claimed)?;

    let mut emitted = HashSet::new();
    let mut chain = Vec::with_capacity(claimed.len());
    emit(first_level, &claimed, &mut emitted, &mut chain);
    Ok(chain)
}

/// Claimed name to its first-seen kind and its own dependencies.
type Claims = HashMap<String, (DependencyKind, Vec<DependencyRef>)>;

fn claim(store: &mut EntityStore, deps: &[DependencyRef], claimed: &mut Claims) -> Result<()> {
    for dep in deps {
        if claimed.contains_key(&dep.name) {
            continue;
        }
        let nested = store.materialize(&dep.name)?.dependencies().to_vec();
        claimed.insert(dep.name.clone(), (dep.kind, nested.clone()));
        claim(store, &nested, claimed)?;
    }
    Ok(())
}

fn emit(
    deps: &[DependencyRef],
    claimed: &Claims,
    emitted: &mut HashSet<String>,
    chain: &mut Vec<DependencyRef>,
) {
    for dep in deps.iter().rev() {
        let Some((kind, nested)) = claimed.get(&dep.name) else {
            continue;
        };
        if !emitted.insert(dep.name.clone()) {
            continue;
        }
        emit(nested, claimed, emitted, chain);
        chain.push(DependencyRef::new(dep.name.clone(), *kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LayerResolver;
    use std::path::Path;
    use tempfile::TempDir;

    fn entity(root: &Path, name: &str, markup: &str) {
        let dir = root.join("blocks").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{name}.html")), markup).unwrap();
    }

    fn store(temp: &TempDir) -> EntityStore {
        EntityStore::new(LayerResolver::new(vec![temp.path().join("blocks")]))
    }

    fn names(chain: &[DependencyRef]) -> Vec<&str> {
        chain.iter().map(|d| d.name.as_str()).collect()
    }

    fn implicit(name: &str) -> DependencyRef {
        DependencyRef::new(name, DependencyKind::Implicit)
    }

    #[test]
    fn test_nested_dependency_precedes_dependent() {
        let temp = TempDir::new().unwrap();
        entity(temp.path(), "x", r#"{% include "y" %}"#);
        entity(temp.path(), "y", "<b class=\"y\"></b>");

        let mut store = store(&temp);
        let chain = build_chain(&mut store, &[DependencyRef::new("x", DependencyKind::Explicit)]).unwrap();
        assert_eq!(names(&chain), vec!["y", "x"]);
        assert_eq!(chain[0].kind, DependencyKind::Explicit);
    }

    #[test]
    fn test_cycle_terminates_with_each_once() {
        let temp = TempDir::new().unwrap();
        entity(temp.path(), "a", "{{ b::b() }}");
        entity(temp.path(), "b", "{{ a::a() }}");

        let mut store = store(&temp);
        let chain = build_chain(&mut store, &[implicit("a")]).unwrap();
        assert_eq!(names(&chain), vec!["b", "a"]);
    }

    #[test]
    fn test_sibling_dependency_still_precedes() {
        let temp = TempDir::new().unwrap();
        entity(temp.path(), "a", "<i class=\"a\"></i>");
        entity(temp.path(), "b", "{{ a::a() }}");

        let mut store = store(&temp);
        let chain = build_chain(&mut store, &[implicit("a"), implicit("b")]).unwrap();
        assert_eq!(names(&chain), vec!["a", "b"]);

        let chain = build_chain(&mut store, &[implicit("b"), implicit("a")]).unwrap();
        assert_eq!(names(&chain), vec!["a", "b"]);
    }

    #[test]
    fn test_independent_siblings_last_discovered_first() {
        let temp = TempDir::new().unwrap();
        entity(temp.path(), "a", "<i class=\"a\"></i>");
        entity(temp.path(), "b", "<i class=\"b\"></i>");

        let mut store = store(&temp);
        let chain = build_chain(&mut store, &[implicit("a"), implicit("b")]).unwrap();
        assert_eq!(names(&chain), vec!["b", "a"]);
    }

    #[test]
    fn test_nested_siblings_keep_reverse_order() {
        let temp = TempDir::new().unwrap();
        entity(temp.path(), "page", r#"{% include "x" %}{% include "y" %}"#);
        entity(temp.path(), "x", "<i class=\"x\"></i>");
        entity(temp.path(), "y", "<i class=\"y\"></i>");

        let mut store = store(&temp);
        let chain = build_chain(&mut store, &[implicit("page"), implicit("z")]).unwrap();
        assert_eq!(names(&chain), vec!["z", "y", "x", "page"]);
    }

    #[test]
    fn test_local_macro_calls_add_no_members() {
        let temp = TempDir::new().unwrap();
        entity(
            temp.path(),
            "menu",
            "{% macro render() %}<ul></ul>{% endmacro %}{% macro menu() %}{{ self::render() }}{% endmacro %}",
        );

        let mut store = store(&temp);
        let chain = build_chain(&mut store, &[implicit("menu")]).unwrap();
        assert_eq!(names(&chain), vec!["menu"]);
        assert!(!store.contains("render"));
    }

    #[test]
    fn test_diamond_is_deterministic() {
        let temp = TempDir::new().unwrap();
        entity(temp.path(), "a", "{{ c::c() }}");
        entity(temp.path(), "b", "{{ c::c() }}");
        entity(temp.path(), "c", "<i class=\"c\"></i>");

        let mut store = store(&temp);
        let first = build_chain(&mut store, &[implicit("a"), implicit("b")]).unwrap();
        assert_eq!(names(&first), vec!["c", "b", "a"]);
        assert_eq!(first, build_chain(&mut store, &[implicit("a"), implicit("b")]).unwrap());
    }

    #[test]
    fn test_first_kind_wins_and_missing_entities_stay() {
        let temp = TempDir::new().unwrap();
        entity(temp.path(), "x", r#"{% include "ghost" %}"#);

        let mut store = store(&temp);
        let chain = build_chain(&mut store, &[implicit("x"), implicit("ghost")]).unwrap();
        assert_eq!(names(&chain), vec!["ghost", "x"]);
        assert_eq!(chain[0].kind, DependencyKind::Explicit);
        assert!(!store.exists("ghost"));
        assert!(store.contains("ghost"));
    }
}
