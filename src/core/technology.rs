//! Entity technologies
//!
//! An entity may be implemented in any subset of technologies, each stored as
//! its own file (or asset directory) next to the entity on every layer.
//!
//! ```rust
//! use bemforge::core::Technology;
//!
//! let tech: Technology = "css".parse().unwrap();
//! assert_eq!(tech, Technology::Style);
//! assert_eq!(tech.extension(), Some("css"));
//! assert!(tech.is_text());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{
    BEHAVIOR_EXTENSION, FONTS_DIR, IMAGES_DIR, MARKUP_EXTENSION, STYLE_EXTENSION,
};

/// A technology an entity can be implemented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    /// Template markup (`.html`), namespaced and scanned for dependencies
    Markup,
    /// Style sheets (`.css`), concatenated across layers
    Style,
    /// Client behavior (`.js`), concatenated across layers
    Behavior,
    /// Image assets from the entity's `img/` directory
    Images,
    /// Font assets from the entity's `fonts/` directory
    Fonts,
}

impl Technology {
    /// Text technologies resolved per file and concatenated in layer order.
    pub const TEXT: [Technology; 3] = [Technology::Markup, Technology::Style, Technology::Behavior];

    /// Technologies whose compiled output is grouped into bundles.
    pub const BUNDLED: [Technology; 2] = [Technology::Style, Technology::Behavior];

    /// File extension for text technologies, `None` for asset directories.
    #[must_use]
    pub const fn extension(&self) -> Option<&'static str> {
        match self {
            Technology::Markup => Some(MARKUP_EXTENSION),
            Technology::Style => Some(STYLE_EXTENSION),
            Technology::Behavior => Some(BEHAVIOR_EXTENSION),
            Technology::Images | Technology::Fonts => None,
        }
    }

    /// Asset directory name for asset technologies, `None` for text ones.
    #[must_use]
    pub const fn asset_dir(&self) -> Option<&'static str> {
        match self {
            Technology::Images => Some(IMAGES_DIR),
            Technology::Fonts => Some(FONTS_DIR),
            _ => None,
        }
    }

    /// Whether this technology is concatenable text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        self.extension().is_some()
    }

    /// Map a file extension back to its text technology.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::TEXT.into_iter().find(|tech| tech.extension() == Some(ext))
    }

    /// Map an asset directory name back to its asset technology.
    #[must_use]
    pub fn from_asset_dir(dir: &str) -> Option<Self> {
        [Technology::Images, Technology::Fonts].into_iter().find(|tech| tech.asset_dir() == Some(dir))
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technology::Markup => write!(f, "markup"),
            Technology::Style => write!(f, "style"),
            Technology::Behavior => write!(f, "behavior"),
            Technology::Images => write!(f, "images"),
            Technology::Fonts => write!(f, "fonts"),
        }
    }
}

impl std::str::FromStr for Technology {
    type Err = crate::core::BemForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "markup" => Ok(Technology::Markup),
            "css" | "style" => Ok(Technology::Style),
            "js" | "behavior" => Ok(Technology::Behavior),
            "img" | "images" => Ok(Technology::Images),
            "fonts" => Ok(Technology::Fonts),
            _ => Err(crate::core::BemForgeError::UnknownTechnology {
                technology: s.to_string(),
            }),
        }
    }
}
