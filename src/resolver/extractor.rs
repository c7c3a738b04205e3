//! Dependency extraction from markup tokens.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::templating::{Token, TokenKind};

/// How an entity reference was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Found through a call or a class name.
    Implicit,
    /// Found through a literal include or import path.
    Explicit,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Implicit => write!(f, "implicit"),
            DependencyKind::Explicit => write!(f, "explicit"),
        }
    }
}

/// A reference from markup to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRef {
    /// Referenced entity name
    pub name: String,
    /// How the reference was found
    pub kind: DependencyKind,
}

impl DependencyRef {
    /// Create a reference.
    pub fn new(name: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Whether the entity's markup should be imported implicitly.
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        self.kind == DependencyKind::Implicit
    }
}

/// Ordered, de-duplicated entity references of a token stream.
///
/// Symbols (calls and class names) give implicit references unless they start
/// with `_`; include paths give explicit ones. The first occurrence of a name
/// decides its kind and position.
///
/// ```rust
/// use bemforge::resolver::{DependencyKind, extract_dependencies};
/// use bemforge::templating::tokenize;
///
/// let tokens = tokenize(r#"{% include "footer" %}<div class="footer">{{ self::_x() }}</div>"#);
/// let deps = extract_dependencies(&tokens);
/// assert_eq!(deps.len(), 1);
/// assert_eq!(deps[0].kind, DependencyKind::Explicit);
/// ```
#[must_use]
pub fn extract_dependencies(tokens: &[Token]) -> Vec<DependencyRef> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for token in tokens {
        let kind = if token.is_symbol() {
            if token.is_private() {
                continue;
            }
            DependencyKind::Implicit
        } else if token.kind == TokenKind::IncludePath {
            DependencyKind::Explicit
        } else {
            continue;
        };

        if seen.insert(token.value.as_str()) {
            deps.push(DependencyRef::new(token.value.clone(), kind));
        }
    }

    deps
}
