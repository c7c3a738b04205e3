//! TOML parsing for configuration files.
//!
//! Reads a file and deserializes it into any [`serde::de::DeserializeOwned`]
//! type. Read failures keep the file path as context; syntax and shape errors
//! surface as [`BemForgeError::ConfigParseError`] so the CLI can point at the
//! offending file.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::BemForgeError;

/// Parse a TOML configuration file into the specified type.
///
/// ```rust,no_run
/// use bemforge::config::parse_config;
/// use serde::Deserialize;
/// use std::path::Path;
///
/// #[derive(Deserialize)]
/// struct Config {
///     levels: Vec<String>,
/// }
///
/// # fn example() -> anyhow::Result<()> {
/// let config: Config = parse_config(Path::new("bemforge.toml"))?;
/// println!("{} levels", config.levels.len());
/// # Ok(())
/// # }
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).map_err(|e| {
        BemForgeError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
