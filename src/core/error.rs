//! Error handling for component views
//!
//! This module provides the error type shared by the whole crate and the
//! user-friendly reporting used by the `components` binary. The error system follows
//! two principles:
//! 1. **Strongly-typed errors** for precise handling in library code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ComponentError`] - Enumerated failure cases of registration, resolution and rendering
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//! - [`user_friendly_error`] - Converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use component_views::core::{ComponentError, user_friendly_error};
//!
//! let error = ComponentError::Inference {
//!     variant: "UsersComponent".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for component registration, resolution and rendering.
///
/// Resolution itself is a pure, single-attempt computation: every variant here aborts
/// the current render call only, and nothing is retried.
///
/// Note that exhausting the ancestor walk is *not* an error. The locator falls back to
/// a best-guess owner and the template engine reports [`TemplateNotFound`] if the file
/// really is missing.
///
/// [`TemplateNotFound`]: ComponentError::TemplateNotFound
#[derive(Error, Debug)]
pub enum ComponentError {
    /// No operation name was supplied and no explicit template name either.
    #[error("Cannot infer a template name for '{variant}': no calling operation was given")]
    Inference {
        /// Variant that attempted the render
        variant: String,
    },

    /// A variant name was referenced but never registered.
    #[error("Component variant '{name}' is not registered")]
    UnknownVariant {
        /// The unknown name
        name: String,
    },

    /// Two definitions share the same variant name.
    #[error("Component variant '{name}' is registered more than once")]
    DuplicateVariant {
        /// The duplicated name
        name: String,
    },

    /// Parent references form a loop.
    #[error("Component inheritance cycle detected: {chain}")]
    VariantCycle {
        /// Human-readable chain, e.g. `A -> B -> A`
        chain: String,
    },

    /// The root variant is abstract and cannot render.
    #[error("Component variant '{name}' is abstract and cannot render templates")]
    AbstractVariant {
        /// Root variant name
        name: String,
    },

    /// The template identifier could escape the template roots or is empty.
    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName {
        /// The rejected identifier
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// The engine could not find the template in any root.
    #[error("Template '{name}' not found")]
    TemplateNotFound {
        /// Qualified template name
        name: String,
        /// Root directories that were searched
        searched: Vec<PathBuf>,
        /// Existing templates with similar names in the same directory
        suggestions: Vec<String>,
    },

    /// The component did not serialize to a map of named fields.
    #[error("Component '{variant}' cannot be exposed to templates: {reason}")]
    InvalidAssigns {
        /// Variant of the offending instance
        variant: String,
        /// What went wrong
        reason: String,
    },

    /// A route helper was called without a required segment.
    #[error("Cannot generate URL for route '{route}': {reason}")]
    RouteGeneration {
        /// Route name
        route: String,
        /// What was missing
        reason: String,
    },

    /// The template engine failed while parsing or rendering.
    #[error("Failed to render template '{template}': {message}")]
    RenderFailed {
        /// Qualified template name
        template: String,
        /// Cleaned-up engine message chain
        message: String,
    },

    /// Configuration content is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// File access failed.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ComponentError {
    /// Shorthand for wrapping an [`std::io::Error`] with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error wrapper carrying user-facing details and a suggestion.
///
/// Details are shown in yellow and suggestions in green by [`display`](Self::display).
#[derive(Debug)]
pub struct ErrorContext {
    /// Main error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context from any displayable error.
    #[must_use]
    pub fn new(error: impl fmt::Display) -> Self {
        Self {
            message: error.to_string(),
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

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

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
        write!(f, "{}", self.message)?;

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

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Recognizes [`ComponentError`] (searched through the whole cause chain so
/// `.context(...)` wrappers do not hide it), [`std::io::Error`] and
/// [`toml::de::Error`]. Anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(component_error) =
        error.chain().find_map(|cause| cause.downcast_ref::<ComponentError>())
    {
        return create_error_context(component_error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorContext::new(&error)
                .with_suggestion("Check file ownership and permissions of the template roots"),
            std::io::ErrorKind::NotFound => ErrorContext::new(&error)
                .with_suggestion("Check that the file or directory exists and the path is correct"),
            _ => ErrorContext::new(&error),
        };
    }

    if let Some(toml_error) = error.chain().find_map(|c| c.downcast_ref::<toml::de::Error>()) {
        return ErrorContext::new(format!("{error:#}"))
            .with_details(toml_error.message().to_string())
            .with_suggestion("Check the TOML syntax of components.toml");
    }

    ErrorContext::new(format!("{error:#}"))
}

fn create_error_context(error: &ComponentError) -> ErrorContext {
    match error {
        ComponentError::Inference {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Pass the calling operation name (e.g. --action show) or an explicit template name",
        ),
        ComponentError::UnknownVariant {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Add the component to the [[components]] list in components.toml",
        ),
        ComponentError::DuplicateVariant {
            ..
        }
        | ComponentError::VariantCycle {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the 'parent' entries of [[components]] in components.toml"),
        ComponentError::AbstractVariant {
            ..
        } => ErrorContext::new(error)
            .with_details("Templates are owned by concrete components, never by the root"),
        ComponentError::TemplateNotFound {
            searched,
            suggestions,
            ..
        } => {
            let roots: Vec<String> = searched.iter().map(|p| p.display().to_string()).collect();
            let ctx =
                ErrorContext::new(error).with_details(format!("Searched in: {}", roots.join(", ")));
            if suggestions.is_empty() {
                ctx.with_suggestion("Create the template file or check the configured handlers")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        ComponentError::RenderFailed {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check the template for unclosed tags, unknown filters or missing variables",
        ),
        _ => ErrorContext::new(error),
    }
}
