//! Component Views - controller-like components that render their own templates
//!
//! A component behaves like a controller action but renders like a view. Each
//! operation computes some state and renders a template named after itself; every
//! exposed field of the component becomes a template variable.
//!
//! # Architecture Overview
//!
//! - Component types form a single-inheritance chain rooted at the abstract `Base`
//!   variant, registered once at startup in a [`component::VariantRegistry`]
//! - Each variant has a canonical path derived from its type name
//!   (`Admin::UsersComponent` → `admin/users`) naming its template directory
//! - A render with no explicit template uses the calling operation's name
//!   (`details_without_caching` → `details`)
//! - Templates are inherited: a name missing from the variant's directory is looked
//!   up under each ancestor's path, but never under the root's
//!
//! # Core Modules
//!
//! - [`component`] - the [`Component`](component::Component) trait, variant paths and the registry
//! - [`templating`] - name inference, ancestor lookup, projection, contexts, engines and caching
//! - [`config`] - `components.toml` loading
//! - [`cli`] - the `components` binary
//! - [`core`] - error types and user-facing error reporting
//! - [`constants`] - shared names and defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use component_views::component::{Component, ComponentState, VariantDefinition, VariantRegistry};
//! use component_views::templating::{ComponentRenderer, ViewPaths};
//! use serde::Serialize;
//! use std::sync::Arc;
//!
//! #[derive(Serialize)]
//! struct LeafComponent {
//!     title: String,
//!     #[serde(skip)]
//!     state: ComponentState,
//! }
//!
//! impl Component for LeafComponent {
//!     fn variant_name(&self) -> &str {
//!         "LeafComponent"
//!     }
//!
//!     fn component_state(&self) -> &ComponentState {
//!         &self.state
//!     }
//! }
//!
//! let registry = VariantRegistry::builder(ViewPaths::new(vec!["app/components".into()]))
//!     .component(VariantDefinition::new("MidComponent"))
//!     .component(VariantDefinition::new("LeafComponent").parent("MidComponent"))
//!     .build()?;
//! let renderer = ComponentRenderer::new(Arc::new(registry));
//!
//! let leaf = LeafComponent { title: "Hello".into(), state: ComponentState::new() };
//! // Uses app/components/leaf/show.tera, or app/components/mid/show.tera if only that exists
//! let html = renderer.render(&leaf, Some("show"), None)?;
//! # Ok::<(), component_views::core::ComponentError>(())
//! ```

pub mod cli;
pub mod component;
pub mod config;
pub mod constants;
pub mod core;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
