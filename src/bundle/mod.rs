//! Bundle calculation and chunk splitting.
//!
//! [`BundleMap::calculate`] records, per entity, the pages whose chains
//! contain it. [`split_chunks`] then assigns each entity's style or behavior
//! output to named groups (`main`, `common` or a page name), and
//! [`render_entity`] produces a single entity's output for targeted updates.

pub mod calculator;
pub mod splitter;

pub use calculator::{BundleEntry, BundleMap};
pub use splitter::{OutputGroups, SplitPolicy, render_entity, split_chunks};
