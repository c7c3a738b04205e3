//! Global constants used throughout the bemforge codebase.
//!
//! This module contains file names, extensions and output group names that
//! are shared across multiple modules. Defining them centrally keeps the
//! on-disk layout discoverable in one place.

/// Name of the project configuration file searched for in the project root.
pub const CONFIG_FILE_NAME: &str = "bemforge.toml";

/// File extension of entity markup and page templates.
pub const MARKUP_EXTENSION: &str = "html";

/// File extension of entity style sources.
pub const STYLE_EXTENSION: &str = "css";

/// File extension of entity behavior sources.
pub const BEHAVIOR_EXTENSION: &str = "js";

/// Directory (inside an entity directory) holding image assets.
pub const IMAGES_DIR: &str = "img";

/// Directory (inside an entity directory) holding font assets.
pub const FONTS_DIR: &str = "fonts";

/// Directory (inside `src_dir`) holding page templates.
pub const TEMPLATES_DIR: &str = "templates";

/// Directory (inside the templates directory) copied verbatim to the output root.
pub const STATIC_DIR: &str = "static";

/// Output group collecting everything when chunk splitting is disabled.
pub const MAIN_GROUP: &str = "main";

/// Output group collecting entities shared by at least `min_chunks` templates.
pub const COMMON_GROUP: &str = "common";

/// Output subdirectory for style groups.
pub const STYLE_OUTPUT_DIR: &str = "css";

/// Output subdirectory for behavior groups.
pub const BEHAVIOR_OUTPUT_DIR: &str = "js";

/// Prefix of the private-scope tag substituted for leading-underscore symbols.
pub const PRIVATE_SCOPE_PREFIX: &str = "s";

/// Number of hex digits of the entity-name digest used in the private-scope tag.
pub const PRIVATE_SCOPE_DIGEST_LEN: usize = 10;

/// Name under which page templates are registered with the template engine.
///
/// Keeps page names from colliding with entity names sharing the same key.
pub const PAGE_TEMPLATE_PREFIX: &str = "@page/";
