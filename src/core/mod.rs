//! Core types and functionality for bemforge
//!
//! This module forms the foundation of the type system shared by every other
//! module: errors, technologies and entity naming.
//!
//! # Modules
//!
//! - `error` - [`BemForgeError`], [`ErrorContext`] and [`user_friendly_error`]
//! - `file_error` - file operation errors carrying path and purpose
//! - `naming` - [`EntityName`] parsing and per-layer file layout
//! - `technology` - [`Technology`] enumeration
//!
//! # Example
//!
//! ```rust
//! use bemforge::core::{EntityName, Technology};
//! use std::path::Path;
//!
//! let name = EntityName::parse("header__logo").unwrap();
//! let ext = Technology::Style.extension().unwrap();
//! assert_eq!(
//!     name.file_path(Path::new("src/blocks"), ext),
//!     Path::new("src/blocks/header/__logo/header__logo.css"),
//! );
//! ```

pub mod error;
pub mod file_error;
pub mod naming;
pub mod technology;

pub use error::{BemForgeError, ErrorContext, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
pub use naming::EntityName;
pub use technology::Technology;
