//! Entity resolution and dependency graph construction.
//!
//! Resolution runs in four steps, leaf first:
//!
//! 1. [`LayerResolver`] finds an entity's files on every override layer and
//!    merges them (text is concatenated in layer order, assets are replaced by
//!    later layers).
//! 2. [`extract_dependencies`] turns markup tokens into an ordered,
//!    de-duplicated list of [`DependencyRef`]s.
//! 3. [`EntityStore`] materializes each entity once and caches it for the
//!    lifetime of the build.
//! 4. [`build_chain`] walks the store depth-first and linearizes everything a
//!    page needs so that every entity follows its own dependencies.
//!
//! Missing entities are never errors at this level. They are logged and kept
//! as empty entries so later references do not resolve them again.

pub mod chain;
pub mod entity_store;
pub mod extractor;
pub mod layers;

pub use chain::build_chain;
pub use entity_store::{Entity, EntityStore};
pub use extractor::{DependencyKind, DependencyRef, extract_dependencies};
pub use layers::LayerResolver;
