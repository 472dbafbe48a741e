//! Template engines.
//!
//! The renderer hands a qualified template name and a [`RenderingContext`] to a
//! [`TemplateEngine`]; the engine owns the final "does this template exist" decision.
//! [`TeraEngine`] is the default implementation.
//!
//! # Autoescaping
//!
//! Templates producing HTML or XML (`show.html.tera`, `feed.xml`) are autoescaped;
//! everything else is rendered verbatim. Use the `safe` filter to opt out per value.
//!
//! # Partials
//!
//! Every template under the view roots is registered under its qualified name, so
//! `{% include "mid/row" %}`, `{% extends "layout" %}` and `{% import %}` resolve
//! through the same search path and candidates as the rendered template.

use std::fs;
use strsim::levenshtein;
use tera::Tera;

use super::context::RenderingContext;
use super::view_paths::{LookupDetails, validate_template_name};
use crate::constants::{MAX_TEMPLATE_SUGGESTIONS, SIMILARITY_THRESHOLD_PERCENT};
use crate::core::{ComponentError, Result};

/// Extensions whose output is HTML-like and gets escaped.
const ESCAPED_FORMATS: &[&str] = &["html", "htm", "xml"];

/// Renders a qualified template name with a rendering context.
pub trait TemplateEngine: Send + Sync {
    /// Render `qualified_name` (e.g. `mid/show`).
    ///
    /// # Errors
    ///
    /// [`ComponentError::TemplateNotFound`] when no file backs the name, or any
    /// engine-specific failure.
    fn render(&self, qualified_name: &str, view: &dyn RenderingContext) -> Result<String>;
}

/// Tera-backed engine reading templates from the context's search roots.
#[derive(Debug, Clone)]
pub struct TeraEngine {
    details: LookupDetails,
}

impl TeraEngine {
    /// Engine probing the given locale/format/handler candidates.
    pub fn new(details: LookupDetails) -> Self {
        Self {
            details,
        }
    }

    /// Candidate expansion used for lookups.
    pub fn details(&self) -> &LookupDetails {
        &self.details
    }

    /// Existing templates next to `qualified_name` with similar names.
    fn suggestions(&self, qualified_name: &str, view: &dyn RenderingContext) -> Vec<String> {
        let prefix = qualified_name.rsplit_once('/').map_or("", |(prefix, _)| prefix);
        if prefix.is_empty() {
            return Vec::new();
        }
        let available = view.view_paths().template_names(prefix, &self.details);
        find_similar_templates(qualified_name, &available)
    }

    /// Every other template under the context's roots, by qualified name, for
    /// `include`, `extends` and `import`. Escaping follows the template being rendered.
    fn partials(&self, rendering: &str, view: &dyn RenderingContext) -> Result<Vec<(String, String)>> {
        let view_paths = view.view_paths();
        let mut partials = Vec::new();
        for name in view_paths.all_template_names(&self.details) {
            if name == rendering {
                continue;
            }
            let Some(path) = view_paths.find(&name, &self.details) else {
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|e| ComponentError::io(&path, e))?;
            partials.push((name, source));
        }
        tracing::trace!("Registered {} partial(s) for '{}'", partials.len(), rendering);
        Ok(partials)
    }

    /// Whether a file's extensions mark it as HTML-like.
    fn is_escaped(&self, file_name: &str) -> bool {
        let mut extensions: Vec<&str> = file_name.split('.').skip(1).collect();
        if extensions.len() > 1
            && extensions.last().is_some_and(|ext| self.details.handlers.iter().any(|h| h == ext))
            && !ESCAPED_FORMATS.contains(extensions.last().unwrap_or(&""))
        {
            extensions.pop();
        }
        extensions.last().is_some_and(|ext| ESCAPED_FORMATS.contains(ext))
    }
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new(LookupDetails::handlers_only(
            crate::constants::DEFAULT_HANDLERS.iter().map(|h| (*h).to_string()).collect(),
        ))
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, qualified_name: &str, view: &dyn RenderingContext) -> Result<String> {
        validate_template_name(qualified_name)?;

        let path = view.view_paths().find(qualified_name, &self.details).ok_or_else(|| {
            ComponentError::TemplateNotFound {
                name: qualified_name.to_string(),
                searched: view.view_paths().roots().to_vec(),
                suggestions: self.suggestions(qualified_name, view),
            }
        })?;
        tracing::debug!("Rendering '{}' from {}", qualified_name, path.display());

        let source = fs::read_to_string(&path).map_err(|e| ComponentError::io(&path, e))?;
        let escaped =
            path.file_name().and_then(|n| n.to_str()).is_some_and(|name| self.is_escaped(name));

        // Tera decides escaping by registered name suffix
        let registered = if escaped {
            format!("{qualified_name}.html")
        } else {
            qualified_name.to_string()
        };

        let mut templates = self.partials(qualified_name, view)?;
        templates.push((registered.clone(), source));

        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        view.install(&mut tera);

        let failed = |e: tera::Error| ComponentError::RenderFailed {
            template: qualified_name.to_string(),
            message: format_tera_error(&e, &registered),
        };
        // Registered together so inheritance chains resolve in any order
        tera.add_raw_templates(templates).map_err(failed)?;
        let context = view.tera_context().map_err(failed)?;
        tera.render(&registered, &context).map_err(failed)
    }
}

/// Flatten a Tera error chain into one readable message.
///
/// Messages that only repeat the template name are dropped, and the registration name
/// is replaced by "template".
pub fn format_tera_error(error: &tera::Error, registered_name: &str) -> String {
    let quoted = format!("'{registered_name}'");
    let mut messages = Vec::new();

    let mut current: Option<&dyn std::error::Error> = Some(error);
    while let Some(err) = current {
        let cleaned = err
            .to_string()
            .replace(&format!("Failed to render {quoted}"), "")
            .replace(&format!("Failed to parse {quoted}"), "")
            .replace(&format!("while rendering {quoted}"), "")
            .replace(&quoted, "template")
            .trim()
            .to_string();
        if !cleaned.is_empty() && !messages.contains(&cleaned) {
            messages.push(cleaned);
        }
        current = err.source();
    }

    if messages.is_empty() {
        "Template syntax error".to_string()
    } else {
        messages.join("\n  → ")
    }
}

/// Closest names by Levenshtein distance, nearest first.
fn find_similar_templates(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<_> = available.iter().map(|name| (name, levenshtein(target, name))).collect();
    scored.sort_by_key(|(_, distance)| *distance);

    scored
        .into_iter()
        .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(MAX_TEMPLATE_SUGGESTIONS)
        .map(|(name, _)| name.clone())
        .collect()
}
