//! File system helpers
//!
//! Writes go through a temp-file-then-rename step so a watcher or browser
//! never observes a half-written output file. Reads attach the path and the
//! reason for the read to the error.
//!
//! ```rust,no_run
//! use bemforge::utils::fs::{ensure_dir, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("build/css"))?;
//! safe_write(Path::new("build/css/common.css"), ".header {}\n")?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod discovery;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{clear_dir, copy_file, ensure_dir, ensure_parent_dir, remove_file};
pub use discovery::{list_files, list_files_matching, read_text_file, read_text_file_if_exists};
