//! Test utilities for bemforge
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration test suite.
//!
//! # Example
//!
//! ```rust,no_run
//! use bemforge::test_utils::{ProjectFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let project = ProjectFixture::new()
//!     .unwrap()
//!     .entity("common.blocks", "header", "css", ".header{}")
//!     .unwrap()
//!     .page("index", "<div class=\"header\"></div>")
//!     .unwrap();
//! assert!(project.path().join("src/templates/index.html").exists());
//! ```

pub mod fixtures;

pub use fixtures::ProjectFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays
/// off.
///
/// ```bash
/// RUST_LOG=bemforge=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
