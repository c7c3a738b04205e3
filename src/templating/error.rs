//! Structured errors for markup rendering.
//!
//! Tera reports parse failures with a `line:column` position and render
//! failures as a chain of messages. Both are captured together with the name of
//! the template that failed so the CLI can point at the right entity.

/// Markup rendering failure.
#[derive(Debug)]
pub enum TemplateError {
    /// A page or entity template could not be parsed.
    SyntaxError {
        /// Template (page or entity) that failed to parse
        template: String,
        /// Cleaned-up engine message
        message: String,
        /// 1-based line reported by the engine
        line: Option<usize>,
        /// Source lines around `line`, with their line numbers
        context_lines: Vec<(usize, String)>,
    },

    /// A template parsed but failed while rendering.
    RenderError {
        /// Page that was being rendered
        template: String,
        /// Cleaned-up engine message chain
        message: String,
    },
}

impl TemplateError {
    /// Name of the template the error is attributed to.
    pub fn template(&self) -> &str {
        match self {
            TemplateError::SyntaxError {
                template,
                ..
            }
            | TemplateError::RenderError {
                template,
                ..
            } => template,
        }
    }

    /// Multi-line description with location and surrounding source.
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::SyntaxError {
                template,
                message,
                line,
                context_lines,
            } => {
                let mut msg = format!("Template: {template}\n");
                if let Some(line) = line {
                    msg.push_str(&format!("Line: {line}\n"));
                }
                msg.push_str(&format!("Error: {message}\n"));

                if !context_lines.is_empty() {
                    msg.push('\n');
                    for (number, text) in context_lines {
                        let marker = if Some(*number) == *line {
                            ">"
                        } else {
                            " "
                        };
                        msg.push_str(&format!("{marker} {number:>4} | {text}\n"));
                    }
                }
                msg
            }
            TemplateError::RenderError {
                template,
                message,
            } => format!("Template: {template}\nError: {message}\n"),
        }
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::SyntaxError {
                template,
                message,
                line: Some(line),
                ..
            } => write!(f, "Template syntax error in '{template}' at line {line}: {message}"),
            TemplateError::SyntaxError {
                template,
                message,
                ..
            } => write!(f, "Template syntax error in '{template}': {message}"),
            TemplateError::RenderError {
                template,
                message,
            } => write!(f, "Failed to render '{template}': {message}"),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Up to `context_size` lines either side of `error_line` (1-based).
pub(crate) fn extract_context_lines(
    content: &str,
    error_line: usize,
    context_size: usize,
) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.lines().collect();
    if error_line == 0 || error_line > lines.len() {
        return Vec::new();
    }

    let start = error_line.saturating_sub(context_size + 1);
    let end = (error_line + context_size).min(lines.len());
    lines[start..end]
        .iter()
        .enumerate()
        .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
        .collect()
}
