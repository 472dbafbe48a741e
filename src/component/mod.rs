//! Component instances and the variant hierarchy.
//!
//! A *component* is a value that behaves like a controller action but renders like a
//! view: its operations compute some state, then ask a
//! [`ComponentRenderer`](crate::templating::ComponentRenderer) to render a template
//! named after the operation. Every exposed field of the component becomes a template
//! variable.
//!
//! Components belong to a *variant* (their type name, e.g. `UsersComponent`). Variants
//! form a single-inheritance chain rooted at the abstract `Base` variant, registered
//! once in a [`VariantRegistry`].
//!
//! # Defining a component
//!
//! ```rust
//! use component_views::component::{Component, ComponentState};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct UsersComponent {
//!     user_id: u64,
//!     name: String,
//!     #[serde(skip)]
//!     state: ComponentState,
//! }
//!
//! impl Component for UsersComponent {
//!     fn variant_name(&self) -> &str {
//!         "UsersComponent"
//!     }
//!
//!     fn component_state(&self) -> &ComponentState {
//!         &self.state
//!     }
//! }
//! ```
//!
//! [`ComponentState`] does not implement `Serialize`, so forgetting `#[serde(skip)]`
//! is a compile error: bookkeeping can never leak into a template.

pub mod path;
pub mod registry;

pub use path::{component_path, underscore};
pub use registry::{RegistryBuilder, VariantDefinition, VariantId, VariantMeta, VariantRegistry};

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, OnceLock};

use crate::templating::Assigns;

/// Interface every renderable component implements.
///
/// The trait is object safe so that rendering contexts can hold a back-reference to
/// the invoking instance as `&dyn Component`. Exposed fields are provided separately
/// through `serde::Serialize`.
pub trait Component {
    /// Type name of the component's variant, as registered in the
    /// [`VariantRegistry`].
    fn variant_name(&self) -> &str;

    /// Internal bookkeeping that must not be exposed to templates.
    fn component_state(&self) -> &ComponentState;
}

/// Internal bookkeeping owned by every component instance.
///
/// Holds the memoized assigned-variables mapping and the handle of the last template
/// rendered by the instance. Intentionally not `Serialize`.
#[derive(Debug, Default)]
pub struct ComponentState {
    assigns_for_view: OnceLock<Arc<Assigns>>,
    template: Mutex<Option<String>>,
}

impl ComponentState {
    /// Create empty bookkeeping state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized projection, if the instance has been projected already.
    pub fn assigns_for_view(&self) -> Option<Arc<Assigns>> {
        self.assigns_for_view.get().cloned()
    }

    /// Store the projection unless one is already present; returns the stored value.
    pub(crate) fn memoize_assigns(&self, assigns: Arc<Assigns>) -> Arc<Assigns> {
        self.assigns_for_view.get_or_init(|| assigns).clone()
    }

    /// Qualified name of the last template rendered by this instance.
    pub fn template(&self) -> Option<String> {
        self.template.lock().ok().and_then(|guard| guard.clone())
    }

    pub(crate) fn set_template(&self, qualified_name: &str) {
        if let Ok(mut guard) = self.template.lock() {
            *guard = Some(qualified_name.to_string());
        }
    }
}

/// A component whose fields are only known at runtime.
///
/// Used by the CLI, where the variant name and the fields come from command-line
/// arguments. Field names may carry a leading `@`, which the projector strips.
#[derive(Debug, Serialize)]
pub struct DynamicComponent {
    #[serde(skip)]
    variant: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(skip)]
    state: ComponentState,
}

impl DynamicComponent {
    /// Create a dynamic component of the given variant with no fields.
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            fields: Map::new(),
            state: ComponentState::new(),
        }
    }

    /// Create a dynamic component with the given fields.
    pub fn with_fields(variant: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            variant: variant.into(),
            fields,
            state: ComponentState::new(),
        }
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The raw fields, before projection.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Component for DynamicComponent {
    fn variant_name(&self) -> &str {
        &self.variant
    }

    fn component_state(&self) -> &ComponentState {
        &self.state
    }
}
