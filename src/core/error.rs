//! Error handling for bemforge
//!
//! This module provides the error types and user-friendly error reporting for the
//! bemforge build engine. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`BemForgeError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Recoverable vs fatal
//!
//! Lookups inside the build pipeline (an entity that resolves to nothing, an
//! include that names an unknown entity) never surface as errors; they are
//! logged where they happen and an empty value is substituted. What reaches
//! this module is configuration trouble and I/O failures outside the
//! pipeline's control, which terminate the process.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bemforge::core::{BemForgeError, ErrorContext, user_friendly_error};
//!
//! let error = BemForgeError::ConfigNotFound { path: "bemforge.toml".to_string() };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::TemplateError;

/// The main error type for bemforge operations
///
/// # Error Categories
///
/// ## Configuration
/// - [`ConfigNotFound`](BemForgeError::ConfigNotFound) - explicitly requested config file missing
/// - [`ConfigParseError`](BemForgeError::ConfigParseError) - invalid TOML in `bemforge.toml`
/// - [`ConfigValidation`](BemForgeError::ConfigValidation) - semantically invalid settings
///
/// ## Entities and templates
/// - [`InvalidEntityName`](BemForgeError::InvalidEntityName) - name does not follow BEM naming
/// - [`UnknownTechnology`](BemForgeError::UnknownTechnology) - unsupported technology key
/// - [`TemplateNotFound`](BemForgeError::TemplateNotFound) - page template not loaded
/// - [`TemplateRender`](BemForgeError::TemplateRender) - markup engine rejected a page
///
/// ## File System
/// - [`FileSystemError`](BemForgeError::FileSystemError) - directory creation or write failure
/// - [`PermissionDenied`](BemForgeError::PermissionDenied) - insufficient permissions
/// - [`IoError`](BemForgeError::IoError) - standard I/O errors
#[derive(Error, Debug)]
pub enum BemForgeError {
    /// Configuration file given on the command line does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Configuration file could not be parsed
    #[error("Invalid configuration in {file}: {reason}")]
    ConfigParseError {
        /// Configuration file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration parsed but contains invalid values
    #[error("Invalid configuration: {reason}")]
    ConfigValidation {
        /// What is wrong with the configuration
        reason: String,
    },

    /// Entity name does not follow the block/element/modifier naming scheme
    #[error("Invalid entity name '{name}': {reason}")]
    InvalidEntityName {
        /// Offending name
        name: String,
        /// Why parsing failed
        reason: String,
    },

    /// Technology key not recognized
    #[error("Unknown technology '{technology}'")]
    UnknownTechnology {
        /// Offending key
        technology: String,
    },

    /// Page template not present in the pipeline
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// Template name (file stem)
        name: String,
    },

    /// Markup rendering failed
    #[error("Failed to render template '{name}'")]
    TemplateRender {
        /// Page template name
        name: String,
        /// Underlying engine error
        #[source]
        source: TemplateError,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// The operation that was denied due to insufficient permissions
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Catch-all for errors without a dedicated variant
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Combines a [`BemForgeError`] with optional details (displayed in yellow) and
/// an actionable suggestion (displayed in green).
///
/// ```rust,no_run
/// use bemforge::core::{BemForgeError, ErrorContext};
///
/// let context = ErrorContext::new(BemForgeError::ConfigValidation {
///     reason: "min_chunks must be at least 1".to_string(),
/// })
/// .with_suggestion("Set [split_chunks] min_chunks = 2 in bemforge.toml");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: BemForgeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: BemForgeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`BemForgeError`], file operation errors, [`std::io::Error`] and
/// [`toml::de::Error`] anywhere in the error chain; everything else is shown
/// with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(forge_error) = cause.downcast_ref::<BemForgeError>() {
            return create_error_context(forge_error, &error);
        }

        if let Some(file_error) = cause.downcast_ref::<super::file_error::FileOperationError>() {
            return ErrorContext::new(BemForgeError::FileSystemError {
                operation: file_error.operation.to_string(),
                path: file_error.file_path.display().to_string(),
            })
            .with_details(file_error.user_message())
            .with_suggestion("Check that the output directory is writable and the disk is not full");
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(BemForgeError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the project and output directories")
                .with_details("bemforge could not read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(BemForgeError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(BemForgeError::ConfigParseError {
            file: crate::constants::CONFIG_FILE_NAME.to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in bemforge.toml. Verify quotes, brackets, and key names");
    }

    ErrorContext::new(BemForgeError::Other {
        message: format_chain(&error),
    })
}

/// Render an error and its causes as a single message.
fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`BemForgeError`] variant to tailored suggestions.
fn create_error_context(error: &BemForgeError, full: &anyhow::Error) -> ErrorContext {
    match error {
        BemForgeError::ConfigNotFound {
            path,
        } => ErrorContext::new(BemForgeError::ConfigNotFound {
            path: path.clone(),
        })
        .with_suggestion("Pass an existing file to --config or run without it to use defaults"),
        BemForgeError::ConfigParseError {
            file,
            reason,
        } => ErrorContext::new(BemForgeError::ConfigParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Check the TOML syntax: string values need quotes and arrays use [ ]"),
        BemForgeError::ConfigValidation {
            reason,
        } => ErrorContext::new(BemForgeError::ConfigValidation {
            reason: reason.clone(),
        })
        .with_details("levels must list at least one directory and min_chunks must be >= 1"),
        BemForgeError::InvalidEntityName {
            name,
            reason,
        } => ErrorContext::new(BemForgeError::InvalidEntityName {
            name: name.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Use block, block__elem, block_mod_val or block__elem_mod_val")
        .with_details("Name words may contain letters, digits and '-'"),
        BemForgeError::UnknownTechnology {
            technology,
        } => ErrorContext::new(BemForgeError::UnknownTechnology {
            technology: technology.clone(),
        })
        .with_suggestion("Supported technologies: html, css, js"),
        BemForgeError::TemplateNotFound {
            name,
        } => ErrorContext::new(BemForgeError::TemplateNotFound {
            name: name.clone(),
        })
        .with_suggestion("Page templates are read from <src_dir>/templates/*.html"),
        BemForgeError::TemplateRender {
            name,
            source,
        } => ErrorContext::new(BemForgeError::Other {
            message: format!("Failed to render template '{name}': {source}"),
        })
        .with_details(source.format_with_context())
        .with_suggestion(
            "Check markup syntax: expressions use {{ }}, tags use {% %}, and imported macros are called as ns::name()",
        ),
        BemForgeError::FileSystemError {
            operation,
            path,
        } => ErrorContext::new(BemForgeError::FileSystemError {
            operation: operation.clone(),
            path: path.clone(),
        })
        .with_details(format_chain(full)),
        BemForgeError::PermissionDenied {
            operation,
            path,
        } => ErrorContext::new(BemForgeError::PermissionDenied {
            operation: operation.clone(),
            path: path.clone(),
        })
        .with_suggestion(format!("Check permissions for {path}")),
        _ => ErrorContext::new(BemForgeError::Other {
            message: format_chain(full),
        }),
    }
}
