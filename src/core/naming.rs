//! Block/element/modifier entity naming and on-disk layout.
//!
//! Entity names follow the "origin" convention: `__` separates an element
//! from its block and `_` introduces a modifier name and optional value.
//! Words consist of ASCII letters, digits and `-`.
//!
//! | Name                  | File on layer `L`                     |
//! |-----------------------|---------------------------------------|
//! | `b`                   | `L/b/b.css`                           |
//! | `b__e`                | `L/b/__e/b__e.css`                    |
//! | `b_m` / `b_m_v`       | `L/b/_m/b_m_v.css`                    |
//! | `b__e_m_v`            | `L/b/__e/_m/b__e_m_v.css`             |
//!
//! ```rust
//! use bemforge::core::EntityName;
//! use std::path::Path;
//!
//! let name = EntityName::parse("menu__item_active").unwrap();
//! assert_eq!(name.block(), "menu");
//! assert_eq!(
//!     name.file_path(Path::new("blocks"), "css"),
//!     Path::new("blocks/menu/__item/_active/menu__item_active.css"),
//! );
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use super::BemForgeError;

const ELEM_DELIM: &str = "__";
const MOD_DELIM: char = '_';

/// A parsed entity name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName {
    block: String,
    elem: Option<String>,
    mod_name: Option<String>,
    mod_val: Option<String>,
}

impl EntityName {
    /// Parse an entity name.
    pub fn parse(name: &str) -> Result<Self, BemForgeError> {
        let invalid = |reason: &str| BemForgeError::InvalidEntityName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let sections: Vec<&str> = name.split(ELEM_DELIM).collect();
        let (block, elem, mods) = match sections.as_slice() {
            [block_part] => {
                let mut words = block_part.split(MOD_DELIM);
                let block = words.next().unwrap_or_default();
                (block, None, words.collect::<Vec<_>>())
            }
            [block, elem_part] => {
                let mut words = elem_part.split(MOD_DELIM);
                let elem = words.next().unwrap_or_default();
                (*block, Some(elem), words.collect::<Vec<_>>())
            }
            _ => return Err(invalid("more than one element delimiter")),
        };

        if mods.len() > 2 {
            return Err(invalid("too many modifier parts"));
        }

        let words = std::iter::once(block).chain(elem).chain(mods.iter().copied());
        for word in words {
            if word.is_empty() {
                return Err(invalid("empty name part"));
            }
            if !word.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(invalid("name parts may only contain letters, digits and '-'"));
            }
        }

        Ok(Self {
            block: block.to_string(),
            elem: elem.map(str::to_string),
            mod_name: mods.first().map(|s| (*s).to_string()),
            mod_val: mods.get(1).map(|s| (*s).to_string()),
        })
    }

    /// Block part of the name.
    pub fn block(&self) -> &str {
        &self.block
    }

    /// Element part, if any.
    pub fn elem(&self) -> Option<&str> {
        self.elem.as_deref()
    }

    /// Modifier name, if any.
    pub fn mod_name(&self) -> Option<&str> {
        self.mod_name.as_deref()
    }

    /// Modifier value, if any.
    pub fn mod_val(&self) -> Option<&str> {
        self.mod_val.as_deref()
    }

    /// Directory holding this entity's files on the given layer.
    pub fn entity_dir(&self, level: &Path) -> PathBuf {
        let mut dir = level.join(&self.block);
        if let Some(elem) = &self.elem {
            dir.push(format!("{ELEM_DELIM}{elem}"));
        }
        if let Some(mod_name) = &self.mod_name {
            dir.push(format!("{MOD_DELIM}{mod_name}"));
        }
        dir
    }

    /// Path of this entity's file with the given extension on the given layer.
    pub fn file_path(&self, level: &Path, extension: &str) -> PathBuf {
        self.entity_dir(level).join(format!("{self}.{extension}"))
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block)?;
        if let Some(elem) = &self.elem {
            write!(f, "{ELEM_DELIM}{elem}")?;
        }
        if let Some(mod_name) = &self.mod_name {
            write!(f, "{MOD_DELIM}{mod_name}")?;
        }
        if let Some(mod_val) = &self.mod_val {
            write!(f, "{MOD_DELIM}{mod_val}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for EntityName {
    type Err = BemForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
