//! Markup rendering with Tera.
//!
//! Pages reach entity markup only through `{% include %}` and `{% import %}`.
//! Instead of letting the engine read files, the renderer asks an
//! [`IncludeResolver`] for each referenced name, follows the references of
//! what it gets back, registers everything in a fresh [`Tera`] instance and
//! renders the page from there.

use regex::Regex;
use std::collections::BTreeMap;
use tera::{Context as TeraContext, Tera};

use super::error::{TemplateError, extract_context_lines};
use super::lexer::{TokenKind, tokenize};
use crate::constants::PAGE_TEMPLATE_PREFIX;

/// Lines of source shown either side of a syntax error.
const ERROR_CONTEXT_LINES: usize = 3;

/// Strategy for looking up included or imported templates by name.
///
/// Implementations never fail: an unknown name is reported however the
/// implementation sees fit and resolves to an empty template.
pub trait IncludeResolver {
    /// Markup for the entity `name`, or an empty string.
    fn resolve_include(&self, name: &str) -> String;
}

impl<F> IncludeResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve_include(&self, name: &str) -> String {
        self(name)
    }
}

/// Capability to turn page markup into final HTML.
pub trait MarkupRenderer {
    /// Render `source` as the page `page_name`, resolving includes through
    /// `includes`.
    fn render(
        &self,
        page_name: &str,
        source: &str,
        includes: &dyn IncludeResolver,
    ) -> Result<String, TemplateError>;
}

/// [`MarkupRenderer`] backed by Tera.
///
/// A new engine instance is built for every page, so nothing leaks between
/// renders and edits to entity markup are always picked up.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraRenderer;

impl TeraRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Collect every template reachable from `source` through include paths.
    fn collect_includes(source: &str, includes: &dyn IncludeResolver) -> BTreeMap<String, String> {
        let mut templates = BTreeMap::new();
        let mut pending: Vec<String> = include_paths(source);

        while let Some(name) = pending.pop() {
            if templates.contains_key(&name) {
                continue;
            }
            let markup = includes.resolve_include(&name);
            pending.extend(include_paths(&markup));
            templates.insert(name, markup);
        }

        templates
    }
}

impl MarkupRenderer for TeraRenderer {
    fn render(
        &self,
        page_name: &str,
        source: &str,
        includes: &dyn IncludeResolver,
    ) -> Result<String, TemplateError> {
        let mut templates = Self::collect_includes(source, includes);
        let page_key = format!("{PAGE_TEMPLATE_PREFIX}{page_name}");
        templates.insert(page_key.clone(), source.to_string());

        tracing::debug!("Rendering page {} with {} template(s)", page_name, templates.len() - 1);

        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().map(|(name, body)| (name.as_str(), body.as_str())))
            .map_err(|e| parse_tera_error(&e, page_name, &templates))?;

        tera.render(&page_key, &TeraContext::new()).map_err(|e| TemplateError::RenderError {
            template: page_name.to_string(),
            message: format_tera_error(&e),
        })
    }
}

fn include_paths(source: &str) -> Vec<String> {
    tokenize(source)
        .into_iter()
        .filter(|token| token.kind == TokenKind::IncludePath)
        .map(|token| token.value)
        .collect()
}

/// Turn a Tera parse failure into a [`TemplateError::SyntaxError`] pointing at
/// the template that failed.
fn parse_tera_error(
    error: &tera::Error,
    page_name: &str,
    templates: &BTreeMap<String, String>,
) -> TemplateError {
    let chain = error_chain(error);
    let failed = Regex::new(r"Failed to parse '([^']+)'")
        .ok()
        .and_then(|re| chain.iter().find_map(|msg| re.captures(msg)?.get(1).map(|m| m.as_str().to_string())));
    let line = Regex::new(r"(\d+):(\d+)")
        .ok()
        .and_then(|re| chain.iter().find_map(|msg| re.captures(msg)?.get(1)?.as_str().parse().ok()));

    let context_lines = match (&failed, line) {
        (Some(name), Some(line)) => templates
            .get(name)
            .map(|body| extract_context_lines(body, line, ERROR_CONTEXT_LINES))
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    let template = match failed {
        Some(name) => display_name(&name, page_name),
        None => page_name.to_string(),
    };

    TemplateError::SyntaxError {
        template,
        message: format_tera_error(error),
        line,
        context_lines,
    }
}

fn display_name(template: &str, page_name: &str) -> String {
    if template.starts_with(PAGE_TEMPLATE_PREFIX) {
        page_name.to_string()
    } else {
        template.to_string()
    }
}

fn error_chain(error: &tera::Error) -> Vec<String> {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}

/// Collapse Tera's error chain into one readable message.
#[must_use]
pub fn format_tera_error(error: &tera::Error) -> String {
    let messages: Vec<String> = error_chain(error)
        .into_iter()
        .map(|msg| msg.replace(PAGE_TEMPLATE_PREFIX, "").trim().to_string())
        .filter(|msg| !msg.is_empty())
        .collect();

    if messages.is_empty() {
        "Template error (no details reported)".to_string()
    } else {
        messages.join("\n  -> ")
    }
}

/// Prelude importing each implicitly referenced entity's macros into a page.
///
/// Entities whose name cannot be turned into a Tera namespace are skipped.
#[must_use]
pub fn import_prelude<'a>(entities: impl IntoIterator<Item = &'a str>) -> String {
    entities
        .into_iter()
        .filter_map(|name| match namespace_alias(name) {
            Some(alias) => Some(format!("{{% import \"{name}\" as {alias} -%}}\n")),
            None => {
                tracing::warn!("Entity '{}' has no valid namespace and is not imported", name);
                None
            }
        })
        .collect()
}

/// Tera namespace under which an entity's macros are imported.
///
/// `-` becomes `_`; names that still are not identifiers have no namespace.
#[must_use]
pub fn namespace_alias(entity: &str) -> Option<String> {
    let alias = entity.replace('-', "_");
    let mut chars = alias.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    (valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')).then_some(alias)
}
