//! Integration test suite for bemforge
//!
//! End-to-end tests that drive the `bemforge` binary and the library's build
//! pipeline against throwaway projects.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build**: `bemforge build` output layout, overrides and split modes
//! - **bundles**: `bemforge bundles` table and JSON output
//! - **chain**: `bemforge chain` tree and JSON output
//! - **config**: configuration discovery and validation errors
//! - **incremental**: file change handling through the library pipeline
//! - **scaffold**: `bemforge add`

mod build;
mod bundles;
mod chain;
mod common;
mod config;
mod incremental;
mod scaffold;
