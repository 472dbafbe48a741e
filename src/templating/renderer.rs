//! The render pipeline.
//!
//! [`ComponentRenderer::render`] turns a component instance and the name of the
//! operation rendering it into output:
//!
//! 1. infer the template name from the operation (or take the explicit one)
//! 2. locate the owning variant by walking the ancestor chain
//! 3. project the instance's exposed fields into template variables
//! 4. instantiate the invoking variant's rendering context
//! 5. hand the qualified name and context to the template engine
//!
//! Failure at any stage aborts that render only. Successful renders record the
//! qualified template name on the instance ([`ComponentState::template`]).
//!
//! [`ComponentState::template`]: crate::component::ComponentState::template
//!
//! # Examples
//!
//! ```rust,no_run
//! use component_views::component::{DynamicComponent, VariantDefinition, VariantRegistry};
//! use component_views::templating::{ComponentRenderer, ViewPaths};
//! use std::sync::Arc;
//!
//! let registry = VariantRegistry::builder(ViewPaths::new(vec!["app/components".into()]))
//!     .component(VariantDefinition::new("UsersComponent"))
//!     .build()?;
//! let renderer = ComponentRenderer::new(Arc::new(registry));
//!
//! let mut users = DynamicComponent::new("UsersComponent");
//! users.set("name", "Ada");
//! // Renders app/components/users/details.tera
//! let html = renderer.render(&users, Some("details"), None)?;
//! # Ok::<(), component_views::core::ComponentError>(())
//! ```

use serde::Serialize;
use std::sync::Arc;

use super::assigns;
use super::cache::ActionCache;
use super::engine::{TemplateEngine, TeraEngine};
use super::inference::infer_template_name;
use super::locator::{LocatedTemplate, TemplateLocator};
use super::view_paths::LookupDetails;
use crate::component::{Component, VariantRegistry};
use crate::constants::DEFAULT_HANDLERS;
use crate::core::Result;

/// Renders component instances against a registry.
pub struct ComponentRenderer<E = TeraEngine> {
    registry: Arc<VariantRegistry>,
    engine: E,
    existence: LookupDetails,
}

impl ComponentRenderer<TeraEngine> {
    /// Renderer using the default handlers for both lookup and rendering.
    pub fn new(registry: Arc<VariantRegistry>) -> Self {
        let handlers: Vec<String> = DEFAULT_HANDLERS.iter().map(|h| (*h).to_string()).collect();
        Self::with_engine(
            registry,
            TeraEngine::new(LookupDetails::handlers_only(handlers.clone())),
            LookupDetails::handlers_only(handlers),
        )
    }
}

impl<E: TemplateEngine> ComponentRenderer<E> {
    /// Renderer with a custom engine. `existence` drives the ancestor walk and should
    /// carry empty locale/format qualifiers.
    pub fn with_engine(registry: Arc<VariantRegistry>, engine: E, existence: LookupDetails) -> Self {
        Self {
            registry,
            engine,
            existence,
        }
    }

    /// The variant registry.
    pub fn registry(&self) -> &Arc<VariantRegistry> {
        &self.registry
    }

    /// The template engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Infer and locate the template a render would use, without rendering.
    ///
    /// # Errors
    ///
    /// Unknown variant, inference failure, abstract root or invalid template name.
    pub fn resolve(
        &self,
        component: &dyn Component,
        caller: Option<&str>,
        template: Option<&str>,
    ) -> Result<LocatedTemplate> {
        let variant = component.variant_name();
        let id = self.registry.lookup(variant)?;
        let name = infer_template_name(variant, template, caller)?;
        TemplateLocator::new(&self.registry, self.existence.clone()).locate(id, &name)
    }

    /// Render a component.
    ///
    /// `caller` is the name of the operation performing the render and names the
    /// template when `template` is `None`. An explicit `template` may be bare
    /// (`card`, looked up along the ancestor chain) or qualified (`shared/card`,
    /// used as-is).
    ///
    /// # Errors
    ///
    /// Any [`ComponentError`](crate::core::ComponentError) raised by resolution,
    /// projection or the engine.
    pub fn render<C>(&self, component: &C, caller: Option<&str>, template: Option<&str>) -> Result<String>
    where
        C: Component + Serialize,
    {
        let located = self.resolve(component, caller, template)?;
        let assigns = assigns::project(component)?;

        let variant = self.registry.lookup(component.variant_name())?;
        let view = self.registry.variant(variant).view_context_class().instantiate(
            Arc::clone(self.registry.view_paths()),
            assigns,
            component,
        );

        let output = self.engine.render(&located.qualified_name, &view)?;
        component.component_state().set_template(&located.qualified_name);
        tracing::debug!(
            "Rendered {} with '{}' ({} bytes)",
            component.variant_name(),
            located.qualified_name,
            output.len()
        );
        Ok(output)
    }

    /// Render through an [`ActionCache`]. The cache supplies the uncached operation
    /// name, which resolves to the same template as `action`.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render). Failed renders are not cached.
    pub fn render_cached<C>(&self, cache: &ActionCache, component: &C, action: &str, key: &str) -> Result<String>
    where
        C: Component + Serialize,
    {
        cache.fetch(component.variant_name(), action, key, |operation| {
            self.render(component, Some(operation), None)
        })
    }
}
