//! Markup lexer.
//!
//! Scans Tera markup for the tokens that matter to dependency discovery and
//! private scoping. Everything else in the source is ignored; the lexer never
//! rejects input, so malformed markup simply yields fewer tokens and the
//! engine reports the syntax problem at render time.
//!
//! | Source                                  | Token                      | Value     |
//! |-----------------------------------------|----------------------------|-----------|
//! | `{% include "header" %}`                | [`TokenKind::IncludePath`] | `header`  |
//! | `{% import "button" as button %}`       | [`TokenKind::IncludePath`] | `button`  |
//! | `{{ button::button(text="Go") }}`       | [`TokenKind::Invocation`]  | `button`  |
//! | `{{ self::icon() }}`                    | [`TokenKind::LocalInvocation`] | `icon` (same-file macro) |
//! | `<div class="menu menu_open">`          | [`TokenKind::ClassName`]   | `menu`, `menu_open` |
//! | `{% macro link(href) %}`                | [`TokenKind::MacroDefinition`] | `link` |
//!
//! A `self::` call can only reach a macro of the same file, so local
//! invocations feed private scoping and never name a dependency.
//!
//! Tokens are returned in source order with the byte span of their value.
//! Comments (`{# ... #}`) produce no tokens.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Kind of a markup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal template name in an `include` or `import` tag.
    IncludePath,
    /// `ns::name(` call; the value is the namespace.
    Invocation,
    /// `self::name(` call; the value is the macro name. Not a symbol.
    LocalInvocation,
    /// One word of a `class` attribute outside template tags.
    ClassName,
    /// Name in a `{% macro name(...) %}` definition.
    MacroDefinition,
}

/// A token with its value and the byte range of the value in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is
    pub kind: TokenKind,
    /// Literal value
    pub value: String,
    /// Byte range of `value` in the scanned source
    pub span: Range<usize>,
}

impl Token {
    fn new(kind: TokenKind, value: &str, start: usize) -> Self {
        Self {
            kind,
            value: value.to_string(),
            span: start..start + value.len(),
        }
    }

    /// Symbol tokens name an entity implicitly (namespaced calls and class names).
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self.kind, TokenKind::Invocation | TokenKind::ClassName)
    }

    /// Whether the token names something private to its entity.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.value.starts_with('_')
    }
}

struct Patterns {
    tag: Regex,
    include: Regex,
    macro_def: Regex,
    invocation: Regex,
    class_attr: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            tag: Regex::new(r"(?s)\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}")?,
            include: Regex::new(r#"^\{%-?\s*(?:include|import)\s+["']([^"']+)["']"#)?,
            macro_def: Regex::new(r"^\{%-?\s*macro\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(")?,
            invocation: Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)::([A-Za-z_][A-Za-z0-9_]*)\s*\(")?,
            class_attr: Regex::new(r#"\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
        })
    }
}

static PATTERNS: LazyLock<Option<Patterns>> = LazyLock::new(|| match Patterns::compile() {
    Ok(patterns) => Some(patterns),
    Err(e) => {
        tracing::error!("Failed to compile markup lexer patterns: {e}");
        None
    }
});

/// Tokenize markup source.
///
/// ```rust
/// use bemforge::templating::{TokenKind, tokenize};
///
/// let tokens = tokenize(r#"{% import "button" as button %}<b class="x">{{ button::button() }}</b>"#);
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [TokenKind::IncludePath, TokenKind::ClassName, TokenKind::Invocation]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let Some(patterns) = PATTERNS.as_ref() else {
        return Vec::new();
    };

    let mut tokens = Vec::new();
    // Tags are blanked out so class attributes are only read from plain markup.
    let mut masked = source.to_string();

    for tag in patterns.tag.find_iter(source) {
        let text = tag.as_str();
        let offset = tag.start();
        masked.replace_range(tag.range(), &"{".repeat(tag.len()));

        if text.starts_with("{#") {
            continue;
        }

        if text.starts_with("{%") {
            if let Some(m) = patterns.include.captures(text).and_then(|c| c.get(1)) {
                tokens.push(Token::new(TokenKind::IncludePath, m.as_str(), offset + m.start()));
            }
            if let Some(m) = patterns.macro_def.captures(text).and_then(|c| c.get(1)) {
                tokens.push(Token::new(TokenKind::MacroDefinition, m.as_str(), offset + m.start()));
            }
        }

        for caps in patterns.invocation.captures_iter(text) {
            let (Some(ns), Some(name)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            if ns.as_str() == "self" {
                tokens.push(Token::new(TokenKind::LocalInvocation, name.as_str(), offset + name.start()));
            } else {
                tokens.push(Token::new(TokenKind::Invocation, ns.as_str(), offset + ns.start()));
            }
        }
    }

    for caps in patterns.class_attr.captures_iter(&masked) {
        let Some(value) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let mut cursor = value.start();
        for word in value.as_str().split_ascii_whitespace() {
            // Words are found in order, so searching from the cursor is exact.
            let Some(pos) = masked[cursor..value.end()].find(word) else {
                continue;
            };
            let start = cursor + pos;
            cursor = start + word.len();
            if word.contains(['{', '}']) {
                continue;
            }
            tokens.push(Token::new(TokenKind::ClassName, word, start));
        }
    }

    tokens.sort_by_key(|token| token.span.start);
    tokens
}
