//! Private macro scoping.
//!
//! Macros whose names start with `_` are private to the entity that defines
//! them. Their definitions and `self::` calls are renamed with a tag derived
//! from the entity name, so two entities can both define `_item` without
//! colliding once their markup is imported into the same page. The tag is a
//! digest of the name, which keeps output identical across builds.

use sha2::{Digest, Sha256};

use super::lexer::{TokenKind, tokenize};
use crate::constants::{PRIVATE_SCOPE_DIGEST_LEN, PRIVATE_SCOPE_PREFIX};

/// Scope tag for an entity, e.g. `s1f0c3e9a2b` for `header`.
#[must_use]
pub fn scope_tag(entity: &str) -> String {
    let digest = hex::encode(Sha256::digest(entity.as_bytes()));
    format!("{PRIVATE_SCOPE_PREFIX}{}", &digest[..PRIVATE_SCOPE_DIGEST_LEN])
}

/// Rename private macro definitions and `self::` calls in `source`.
///
/// `{% macro _x() %}` becomes `{% macro <tag>_x() %}` and `self::_x(` becomes
/// `self::<tag>_x(`. Calls through other namespaces are left alone.
#[must_use]
pub fn apply_private_scope(entity: &str, source: &str) -> String {
    let private: Vec<_> = tokenize(source)
        .into_iter()
        .filter(|token| {
            matches!(token.kind, TokenKind::MacroDefinition | TokenKind::LocalInvocation)
                && token.is_private()
        })
        .collect();

    if private.is_empty() {
        return source.to_string();
    }

    let tag = scope_tag(entity);
    let mut scoped = String::with_capacity(source.len() + private.len() * tag.len());
    let mut cursor = 0;
    for token in &private {
        scoped.push_str(&source[cursor..token.span.start]);
        scoped.push_str(&tag);
        scoped.push_str(&token.value);
        cursor = token.span.end;
    }
    scoped.push_str(&source[cursor..]);

    tracing::trace!("Scoped {} private symbol(s) in {} as {}", private.len(), entity, tag);
    scoped
}
