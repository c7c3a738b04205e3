//! bemforge - layered BEM entity resolver and asset bundler
//!
//! bemforge builds component-oriented front-end projects. Components
//! ("entities") follow BEM naming and live on ordered override levels; each
//! entity may have markup, styles, behaviors, images and fonts. Page templates
//! reference entities, and bemforge works out everything each page needs,
//! renders the pages and bundles styles and behaviors into shared and
//! per-page output files.
//!
//! # Architecture Overview
//!
//! ```text
//! page template ──> lexer ──> dependency refs ──> entity store ──> chain
//!                                                    ▲               │
//!                                   layer resolver ──┘               ▼
//!                                                              bundle map
//!                                                                    │
//!                   pages <── renderer (Tera)        chunk splitter ──> css / js groups
//! ```
//!
//! # Core Modules
//!
//! - [`core`] - Errors, [`core::Technology`] and BEM [`core::EntityName`]s
//! - [`config`] - `bemforge.toml` loading and validation
//! - [`templating`] - Markup lexer, private macro scoping and rendering
//! - [`resolver`] - Layer resolution, dependency extraction, entity store and chains
//! - [`bundle`] - Bundle map and chunk splitting
//! - [`pipeline`] - Full and incremental builds, output writing
//! - [`scaffold`] - Skeleton files for new entities
//! - [`cli`] - The `bemforge` command line
//! - [`utils`] - File system helpers
//!
//! # Project Layout
//!
//! ```text
//! project/
//! ├── bemforge.toml
//! ├── common.blocks/            # shared level
//! │   └── button/
//! │       ├── button.html
//! │       └── button.css
//! └── src/
//!     ├── blocks/               # project level, overrides common.blocks
//!     │   └── header/
//!     │       ├── header.css
//!     │       ├── __logo/header__logo.html
//!     │       └── img/logo.png
//!     └── templates/
//!         ├── index.html
//!         └── static/robots.txt
//! ```
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use bemforge::config::ProjectConfig;
//! use bemforge::pipeline::{BuildPipeline, OutputWriter};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ProjectConfig::discover(None)?;
//! let writer = OutputWriter::new(config.out_dir());
//! let mut pipeline = BuildPipeline::new(config);
//! let summary = writer.apply(&pipeline.full_build()?)?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod pipeline;
pub mod resolver;
pub mod scaffold;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
