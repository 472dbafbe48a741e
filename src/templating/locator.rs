//! Ancestor-chain template lookup.
//!
//! A bare template name is looked up under the invoking variant's path first, then
//! under each ancestor's path, so templates are inherited down the component chain.
//! The root variant takes part in the chain but is never itself a template owner:
//! the walk stops at the last non-root ancestor.
//!
//! When no ancestor owns the template, the variant the walk stopped at is returned as
//! a best guess ([`LocatedTemplate::found`] is `false`) and the template engine makes
//! the final "not found" decision.

use super::view_paths::{LookupDetails, ViewPaths, validate_template_name};
use crate::component::{VariantId, VariantRegistry};
use crate::core::{ComponentError, Result};

/// Outcome of a template lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedTemplate {
    /// Variant whose directory owns the template
    pub owner: VariantId,
    /// Name handed to the template engine, e.g. `mid/show`
    pub qualified_name: String,
    /// Whether a matching file was seen during the walk. Always `false` for names
    /// that were already qualified, since no search is performed for them.
    pub found: bool,
}

/// Walks the variant chain of a registry looking for template owners.
pub struct TemplateLocator<'a> {
    registry: &'a VariantRegistry,
    view_paths: &'a ViewPaths,
    details: LookupDetails,
}

impl<'a> TemplateLocator<'a> {
    /// Locator over the registry's shared search path. `details` should carry empty
    /// locale/format qualifiers and the configured handler extensions.
    pub fn new(registry: &'a VariantRegistry, details: LookupDetails) -> Self {
        Self {
            registry,
            view_paths: registry.view_paths(),
            details,
        }
    }

    /// Locate `template_name` for a render started by `start`.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::AbstractVariant`] if `start` is the root variant
    /// - [`ComponentError::InvalidTemplateName`] if the name could escape the roots
    pub fn locate(&self, start: VariantId, template_name: &str) -> Result<LocatedTemplate> {
        if self.registry.is_root(start) {
            return Err(ComponentError::AbstractVariant {
                name: self.registry.variant(start).name().to_string(),
            });
        }
        validate_template_name(template_name)?;

        if template_name.contains('/') {
            tracing::debug!("Template '{}' is qualified, skipping ancestor search", template_name);
            return Ok(LocatedTemplate {
                owner: start,
                qualified_name: template_name.to_string(),
                found: false,
            });
        }

        let mut current = start;
        let found = loop {
            let path = self.registry.path(current);
            if self.view_paths.exists(template_name, path, &self.details) {
                break true;
            }
            match self.registry.parent(current) {
                Some(parent) if !self.registry.is_root(parent) => current = parent,
                _ => break false,
            }
        };

        let qualified_name = format!("{}/{}", self.registry.path(current), template_name);
        if found {
            tracing::debug!(
                "Template '{}' owned by {}",
                qualified_name,
                self.registry.variant(current).name()
            );
        } else {
            tracing::warn!(
                "No ancestor of {} owns template '{}', falling back to '{}'",
                self.registry.variant(start).name(),
                template_name,
                qualified_name
            );
        }

        Ok(LocatedTemplate {
            owner: current,
            qualified_name,
            found,
        })
    }
}
