//! Markup handling: lexing, private scoping and rendering.
//!
//! Entity and page markup is written in the Tera template language. An
//! entity's markup typically defines macros named after the entity:
//!
//! ```text
//! {% macro _label(text) %}<span class="button__label">{{ text }}</span>{% endmacro %}
//! {% macro button(text) %}<button class="button">{{ self::_label(text=text) }}</button>{% endmacro %}
//! ```
//!
//! and pages call them through the entity's namespace:
//!
//! ```text
//! <body class="page">{{ button::button(text="Buy") }}</body>
//! ```
//!
//! The page never imports `button` itself. The build discovers the call,
//! puts `button` into the page's chain and prepends
//! `{% import "button" as button %}` before rendering.
//!
//! - [`lexer`] finds include paths, calls, class names and macro definitions
//! - [`scope`] renames `_private` macros per entity
//! - [`renderer`] renders pages with Tera through an [`IncludeResolver`]
//! - [`error`] holds [`TemplateError`]

pub mod error;
pub mod lexer;
pub mod renderer;
pub mod scope;

pub use error::TemplateError;
pub use lexer::{Token, TokenKind, tokenize};
pub use renderer::{
    IncludeResolver, MarkupRenderer, TeraRenderer, format_tera_error, import_prelude,
    namespace_alias,
};
pub use scope::{apply_private_scope, scope_tag};
