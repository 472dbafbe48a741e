//! Per-variant rendering contexts.
//!
//! Each variant owns one [`ViewContextClass`], composed once at registration from three
//! capabilities:
//!
//! - routing: the shared [`RouteSet`], exposed as `url_for` and `<route>_path`
//! - general helpers: every [`ViewHelper`] of the variant and its ancestors, root first
//! - the base context: template roots, assigns and a back-reference to the invoking
//!   component, exposed as `controller_path()` and `controller_name()`
//!
//! A render instantiates the class into a short-lived [`ViewContext`]. Each capability
//! is a separate trait so engines and helpers can ask for only what they use;
//! [`RenderingContext`] is their union.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tera::{Context as TeraContext, Tera};

use super::assigns::Assigns;
use super::helpers::{RouteSet, ViewHelper};
use super::view_paths::ViewPaths;
use crate::component::Component;
use crate::core::Result;

/// URL generation from named routes.
pub trait RoutingHelpers {
    /// The route table.
    fn routes(&self) -> &RouteSet;

    /// Generate the URL of a named route.
    ///
    /// # Errors
    ///
    /// See [`RouteSet::url_for`].
    fn url_for(&self, route: &str, params: &HashMap<String, Value>) -> Result<String> {
        self.routes().url_for(route, params)
    }
}

/// General view helpers inherited along the variant chain.
pub trait ViewHelpers {
    /// Helpers in installation order, root first.
    fn helpers(&self) -> &[Arc<dyn ViewHelper>];
}

/// The standard template environment.
pub trait BaseContext {
    /// Template roots.
    fn view_paths(&self) -> &ViewPaths;

    /// Variables visible to the template.
    fn assigns(&self) -> &Assigns;

    /// The component that started the render.
    fn controller(&self) -> &dyn Component;

    /// Canonical path of the variant whose context this is, e.g. `users`.
    fn controller_path(&self) -> &str;

    /// Last segment of [`controller_path`](Self::controller_path).
    fn controller_name(&self) -> &str {
        let path = self.controller_path();
        path.rsplit('/').next().unwrap_or(path)
    }
}

/// Everything a template engine needs from a render.
pub trait RenderingContext: RoutingHelpers + ViewHelpers + BaseContext {
    /// Register every capability on a fresh Tera instance.
    fn install(&self, tera: &mut Tera);

    /// Template variables as a Tera context.
    ///
    /// # Errors
    ///
    /// Fails only if the assigns cannot be converted, which a JSON object never does.
    fn tera_context(&self) -> tera::Result<TeraContext> {
        TeraContext::from_value(Value::Object(self.assigns().clone()))
    }
}

/// Rendering-context class of one variant. Built once, shared by every render.
pub struct ViewContextClass {
    variant_name: String,
    variant_path: String,
    routes: Arc<RouteSet>,
    helpers: Vec<Arc<dyn ViewHelper>>,
}

impl ViewContextClass {
    /// Compose the class for a variant. `helpers` are the inherited helpers followed by
    /// the variant's own.
    pub(crate) fn compose(
        variant_name: &str,
        variant_path: &str,
        routes: Arc<RouteSet>,
        helpers: Vec<Arc<dyn ViewHelper>>,
    ) -> Self {
        Self {
            variant_name: variant_name.to_string(),
            variant_path: variant_path.to_string(),
            routes,
            helpers,
        }
    }

    /// Variant this class was composed for.
    pub fn variant_name(&self) -> &str {
        &self.variant_name
    }

    /// Helpers in installation order.
    pub fn helpers(&self) -> &[Arc<dyn ViewHelper>] {
        &self.helpers
    }

    /// Helper names in installation order.
    pub fn helper_names(&self) -> Vec<&str> {
        self.helpers.iter().map(|h| h.name()).collect()
    }

    /// Shared route table.
    pub fn routes(&self) -> &Arc<RouteSet> {
        &self.routes
    }

    /// Create the context for one render.
    pub fn instantiate<'a>(
        self: &Arc<Self>,
        view_paths: Arc<ViewPaths>,
        assigns: Arc<Assigns>,
        controller: &'a dyn Component,
    ) -> ViewContext<'a> {
        ViewContext {
            class: Arc::clone(self),
            view_paths,
            assigns,
            controller,
        }
    }
}

impl fmt::Debug for ViewContextClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContextClass")
            .field("variant_name", &self.variant_name)
            .field("variant_path", &self.variant_path)
            .field("routes", &self.routes.len())
            .field("helpers", &self.helper_names())
            .finish()
    }
}

/// Context of a single render.
pub struct ViewContext<'a> {
    class: Arc<ViewContextClass>,
    view_paths: Arc<ViewPaths>,
    assigns: Arc<Assigns>,
    controller: &'a dyn Component,
}

impl ViewContext<'_> {
    /// The class this context was instantiated from.
    pub fn class(&self) -> &Arc<ViewContextClass> {
        &self.class
    }
}

impl RoutingHelpers for ViewContext<'_> {
    fn routes(&self) -> &RouteSet {
        &self.class.routes
    }
}

impl ViewHelpers for ViewContext<'_> {
    fn helpers(&self) -> &[Arc<dyn ViewHelper>] {
        &self.class.helpers
    }
}

impl BaseContext for ViewContext<'_> {
    fn view_paths(&self) -> &ViewPaths {
        &self.view_paths
    }

    fn assigns(&self) -> &Assigns {
        &self.assigns
    }

    fn controller(&self) -> &dyn Component {
        self.controller
    }

    fn controller_path(&self) -> &str {
        &self.class.variant_path
    }
}

impl RenderingContext for ViewContext<'_> {
    fn install(&self, tera: &mut Tera) {
        self.class.routes.install(tera);

        let path = self.controller_path().to_string();
        tera.register_function("controller_path", move |_: &HashMap<String, Value>| {
            Ok(Value::String(path.clone()))
        });
        let name = self.controller_name().to_string();
        tera.register_function("controller_name", move |_: &HashMap<String, Value>| {
            Ok(Value::String(name.clone()))
        });

        // Later helpers override earlier ones, so a variant can shadow its ancestors
        for helper in self.helpers() {
            tracing::trace!("Installing helper '{}' for {}", helper.name(), self.class.variant_name);
            helper.install(tera, self);
        }
    }
}

impl fmt::Debug for ViewContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("class", &self.class)
            .field("assigns", &self.assigns)
            .field("controller", &self.controller.variant_name())
            .finish()
    }
}
