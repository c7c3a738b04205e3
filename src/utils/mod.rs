//! Utilities shared by the pipeline, the output writer and the CLI.
//!
//! - [`fs`] - directory creation, atomic writes and file discovery

pub mod fs;

pub use fs::{atomic_write, copy_file, ensure_dir, list_files, read_text_file, safe_write};
