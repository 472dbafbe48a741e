//! Variant registration and per-variant metadata.
//!
//! Every component variant is described by a [`VariantMeta`] record built exactly
//! once, when the [`VariantRegistry`] is constructed at startup:
//!
//! - the canonical path (see [`component_path`])
//! - the resolved parent (the root `Base` variant has none)
//! - the composed [`ViewContextClass`] (routes + inherited helpers + base context)
//!
//! The search-directory list is process-wide configuration and is shared by every
//! variant through [`VariantRegistry::view_paths`].
//!
//! After construction the registry is immutable and can be shared between threads
//! behind an `Arc`. Parent references are validated during [`RegistryBuilder::build`]:
//! unknown parents, duplicate names and inheritance cycles are rejected there, so an
//! ancestor walk over a built registry always terminates at the root.
//!
//! # Examples
//!
//! ```rust
//! use component_views::component::{VariantDefinition, VariantRegistry};
//! use component_views::templating::ViewPaths;
//!
//! let registry = VariantRegistry::builder(ViewPaths::new(vec!["app/components".into()]))
//!     .component(VariantDefinition::new("MidComponent"))
//!     .component(VariantDefinition::new("LeafComponent").parent("MidComponent"))
//!     .build()?;
//!
//! let leaf = registry.lookup("LeafComponent")?;
//! assert_eq!(registry.path(leaf), "leaf");
//! let chain: Vec<&str> = registry.ancestors(leaf).map(|id| registry.path(id)).collect();
//! assert_eq!(chain, ["leaf", "mid", "base"]);
//! # Ok::<(), component_views::core::ComponentError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::path::component_path;
use crate::constants::ROOT_VARIANT_NAME;
use crate::core::{ComponentError, Result};
use crate::templating::{RouteSet, ViewContextClass, ViewHelper, ViewPaths};

/// Index of a variant inside the registry that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId(usize);

/// Registered metadata of one variant.
pub struct VariantMeta {
    id: VariantId,
    name: String,
    path: String,
    parent: Option<VariantId>,
    view_context_class: Arc<ViewContextClass>,
}

impl VariantMeta {
    /// Identifier of this variant.
    pub fn id(&self) -> VariantId {
        self.id
    }

    /// Type name, e.g. `UsersComponent`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical path, e.g. `users`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parent variant; `None` only for the root.
    pub fn parent(&self) -> Option<VariantId> {
        self.parent
    }

    /// The rendering-context class composed for this variant.
    pub fn view_context_class(&self) -> &Arc<ViewContextClass> {
        &self.view_context_class
    }
}

impl fmt::Debug for VariantMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantMeta")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("path", &self.path)
            .field("parent", &self.parent)
            .field("helpers", &self.view_context_class.helper_names())
            .finish()
    }
}

/// Declaration of a variant before registration.
#[derive(Clone)]
pub struct VariantDefinition {
    name: String,
    parent: Option<String>,
    helpers: Vec<Arc<dyn ViewHelper>>,
}

impl VariantDefinition {
    /// Declare a variant that inherits directly from the root.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            helpers: Vec::new(),
        }
    }

    /// Set the parent variant by name.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a helper module available to this variant and its descendants.
    #[must_use]
    pub fn helper(mut self, helper: impl ViewHelper + 'static) -> Self {
        self.helpers.push(Arc::new(helper));
        self
    }

    /// Add an already shared helper module.
    #[must_use]
    pub fn shared_helper(mut self, helper: Arc<dyn ViewHelper>) -> Self {
        self.helpers.push(helper);
        self
    }

    /// Declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parent, if any.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Builder collecting variant definitions before validation.
pub struct RegistryBuilder {
    view_paths: ViewPaths,
    routes: RouteSet,
    base_helpers: Vec<Arc<dyn ViewHelper>>,
    definitions: Vec<VariantDefinition>,
}

impl RegistryBuilder {
    /// Start a registry over the given template roots.
    pub fn new(view_paths: ViewPaths) -> Self {
        Self {
            view_paths,
            routes: RouteSet::default(),
            base_helpers: Vec::new(),
            definitions: Vec::new(),
        }
    }

    /// Route set mixed into every variant's rendering context.
    #[must_use]
    pub fn routes(mut self, routes: RouteSet) -> Self {
        self.routes = routes;
        self
    }

    /// Helper module attached to the root, and so inherited by every variant.
    #[must_use]
    pub fn base_helper(mut self, helper: impl ViewHelper + 'static) -> Self {
        self.base_helpers.push(Arc::new(helper));
        self
    }

    /// Add a variant definition. Definitions may appear in any order.
    #[must_use]
    pub fn component(mut self, definition: VariantDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Add several variant definitions.
    #[must_use]
    pub fn components(mut self, definitions: impl IntoIterator<Item = VariantDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Validate the definitions and compute every variant's metadata.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::DuplicateVariant`] if a name is declared twice (or reuses the
    ///   root name)
    /// - [`ComponentError::UnknownVariant`] if a parent is never declared
    /// - [`ComponentError::VariantCycle`] if parent references loop
    pub fn build(self) -> Result<VariantRegistry> {
        let routes = Arc::new(self.routes);
        let view_paths = Arc::new(self.view_paths);

        let mut definitions: HashMap<&str, &VariantDefinition> = HashMap::new();
        for definition in &self.definitions {
            if definition.name == ROOT_VARIANT_NAME
                || definitions.insert(definition.name.as_str(), definition).is_some()
            {
                return Err(ComponentError::DuplicateVariant {
                    name: definition.name.clone(),
                });
            }
        }

        let root = VariantMeta {
            id: VariantId(0),
            name: ROOT_VARIANT_NAME.to_string(),
            path: component_path(ROOT_VARIANT_NAME),
            parent: None,
            view_context_class: Arc::new(ViewContextClass::compose(
                ROOT_VARIANT_NAME,
                &component_path(ROOT_VARIANT_NAME),
                Arc::clone(&routes),
                self.base_helpers.clone(),
            )),
        };

        let mut linker = Linker {
            definitions,
            routes: Arc::clone(&routes),
            variants: vec![root],
            by_name: HashMap::from([(ROOT_VARIANT_NAME.to_string(), VariantId(0))]),
            visiting: Vec::new(),
        };

        for definition in &self.definitions {
            linker.link(&definition.name)?;
        }

        tracing::debug!("Registered {} component variant(s)", linker.variants.len() - 1);

        Ok(VariantRegistry {
            variants: linker.variants,
            by_name: linker.by_name,
            view_paths,
            routes,
        })
    }
}

/// Depth-first parent resolution used by [`RegistryBuilder::build`].
struct Linker<'a> {
    definitions: HashMap<&'a str, &'a VariantDefinition>,
    routes: Arc<RouteSet>,
    variants: Vec<VariantMeta>,
    by_name: HashMap<String, VariantId>,
    visiting: Vec<String>,
}

impl Linker<'_> {
    fn link(&mut self, name: &str) -> Result<VariantId> {
        if let Some(id) = self.by_name.get(name) {
            return Ok(*id);
        }

        if let Some(start) = self.visiting.iter().position(|v| v == name) {
            let mut chain: Vec<&str> = self.visiting[start..].iter().map(String::as_str).collect();
            chain.push(name);
            return Err(ComponentError::VariantCycle {
                chain: chain.join(" -> "),
            });
        }

        let definition = *self.definitions.get(name).ok_or_else(|| ComponentError::UnknownVariant {
            name: name.to_string(),
        })?;

        self.visiting.push(name.to_string());
        let parent = match definition.parent.as_deref() {
            None => VariantId(0),
            Some(parent) => self.link(parent)?,
        };
        self.visiting.pop();

        let mut helpers = self.variants[parent.0].view_context_class.helpers().to_vec();
        helpers.extend(definition.helpers.iter().cloned());

        let id = VariantId(self.variants.len());
        let path = component_path(name);
        tracing::trace!("Linked variant {} (path '{}') under {}", name, path, self.variants[parent.0].name);

        self.variants.push(VariantMeta {
            id,
            name: name.to_string(),
            view_context_class: Arc::new(ViewContextClass::compose(
                name,
                &path,
                Arc::clone(&self.routes),
                helpers,
            )),
            path,
            parent: Some(parent),
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }
}

/// Immutable registry of component variants.
pub struct VariantRegistry {
    variants: Vec<VariantMeta>,
    by_name: HashMap<String, VariantId>,
    view_paths: Arc<ViewPaths>,
    routes: Arc<RouteSet>,
}

impl VariantRegistry {
    /// Start building a registry over the given template roots.
    pub fn builder(view_paths: ViewPaths) -> RegistryBuilder {
        RegistryBuilder::new(view_paths)
    }

    /// The abstract root variant.
    pub fn root(&self) -> VariantId {
        VariantId(0)
    }

    /// Whether `id` is the root variant.
    pub fn is_root(&self, id: VariantId) -> bool {
        id.0 == 0
    }

    /// Look a variant up by type name.
    pub fn id(&self, name: &str) -> Option<VariantId> {
        self.by_name.get(name).copied()
    }

    /// Look a variant up by type name, failing if it is not registered.
    pub fn lookup(&self, name: &str) -> Result<VariantId> {
        self.id(name).ok_or_else(|| ComponentError::UnknownVariant {
            name: name.to_string(),
        })
    }

    /// Metadata of a variant.
    ///
    /// # Panics
    ///
    /// Panics if `id` was produced by a different registry.
    pub fn variant(&self, id: VariantId) -> &VariantMeta {
        &self.variants[id.0]
    }

    /// Canonical path of a variant.
    pub fn path(&self, id: VariantId) -> &str {
        self.variant(id).path()
    }

    /// Parent of a variant; `None` for the root.
    pub fn parent(&self, id: VariantId) -> Option<VariantId> {
        self.variant(id).parent()
    }

    /// The variant itself followed by each ancestor, ending with the root.
    pub fn ancestors(&self, id: VariantId) -> impl Iterator<Item = VariantId> + '_ {
        std::iter::successors(Some(id), move |current| self.parent(*current))
    }

    /// Template roots shared by every variant.
    pub fn view_paths(&self) -> &Arc<ViewPaths> {
        &self.view_paths
    }

    /// Route set shared by every variant.
    pub fn routes(&self) -> &Arc<RouteSet> {
        &self.routes
    }

    /// All variants, the root first and every parent before its children.
    pub fn iter(&self) -> impl Iterator<Item = &VariantMeta> {
        self.variants.iter()
    }

    /// Number of registered variants, including the root.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false: the root is always registered.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("variants", &self.variants)
            .field("view_paths", &self.view_paths)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::HelperModule;

    fn builder() -> RegistryBuilder {
        VariantRegistry::builder(ViewPaths::new(vec!["app/components".into()]))
    }

    #[test]
    fn test_root_is_always_registered() {
        let registry = builder().build().unwrap();
        assert_eq!(registry.len(), 1);
        let root = registry.root();
        assert!(registry.is_root(root));
        assert_eq!(registry.variant(root).name(), "Base");
        assert_eq!(registry.path(root), "base");
        assert_eq!(registry.parent(root), None);
    }

    #[test]
    fn test_definitions_in_any_order() {
        let registry = builder()
            .component(VariantDefinition::new("LeafComponent").parent("MidComponent"))
            .component(VariantDefinition::new("MidComponent"))
            .build()
            .unwrap();

        let leaf = registry.lookup("LeafComponent").unwrap();
        let mid = registry.lookup("MidComponent").unwrap();
        assert_eq!(registry.parent(leaf), Some(mid));
        assert_eq!(registry.parent(mid), Some(registry.root()));
        // Parents are stored before their children
        assert!(mid < leaf);
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let result = builder()
            .component(VariantDefinition::new("LeafComponent").parent("MissingComponent"))
            .build();
        assert!(matches!(
            result,
            Err(ComponentError::UnknownVariant { ref name }) if name == "MissingComponent"
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = builder()
            .component(VariantDefinition::new("MidComponent"))
            .component(VariantDefinition::new("MidComponent"))
            .build();
        assert!(matches!(result, Err(ComponentError::DuplicateVariant { .. })));

        let result = builder().component(VariantDefinition::new("Base")).build();
        assert!(matches!(result, Err(ComponentError::DuplicateVariant { .. })));
    }

    #[test]
    fn test_cycle_rejected() {
        let result = builder()
            .component(VariantDefinition::new("AComponent").parent("BComponent"))
            .component(VariantDefinition::new("BComponent").parent("AComponent"))
            .build();
        match result {
            Err(ComponentError::VariantCycle { chain }) => {
                assert_eq!(chain, "AComponent -> BComponent -> AComponent");
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_base_parent() {
        let registry = builder()
            .component(VariantDefinition::new("MidComponent").parent("Base"))
            .build()
            .unwrap();
        let mid = registry.lookup("MidComponent").unwrap();
        assert_eq!(registry.parent(mid), Some(registry.root()));
    }

    #[test]
    fn test_ancestors_end_at_root() {
        let registry = builder()
            .component(VariantDefinition::new("MidComponent"))
            .component(VariantDefinition::new("LeafComponent").parent("MidComponent"))
            .build()
            .unwrap();
        let leaf = registry.lookup("LeafComponent").unwrap();
        let names: Vec<&str> = registry.ancestors(leaf).map(|id| registry.variant(id).name()).collect();
        assert_eq!(names, ["LeafComponent", "MidComponent", "Base"]);
    }

    #[test]
    fn test_helpers_are_inherited() {
        let registry = builder()
            .base_helper(HelperModule::new("application"))
            .component(VariantDefinition::new("MidComponent").helper(HelperModule::new("mid")))
            .component(
                VariantDefinition::new("LeafComponent")
                    .parent("MidComponent")
                    .helper(HelperModule::new("leaf")),
            )
            .build()
            .unwrap();

        let leaf = registry.lookup("LeafComponent").unwrap();
        let class = registry.variant(leaf).view_context_class();
        assert_eq!(class.helper_names(), ["application", "mid", "leaf"]);

        let mid = registry.lookup("MidComponent").unwrap();
        assert_eq!(registry.variant(mid).view_context_class().helper_names(), ["application", "mid"]);
    }

    #[test]
    fn test_view_context_class_is_shared() {
        let registry = builder().component(VariantDefinition::new("MidComponent")).build().unwrap();
        let mid = registry.lookup("MidComponent").unwrap();
        let first = Arc::clone(registry.variant(mid).view_context_class());
        let second = Arc::clone(registry.variant(mid).view_context_class());
        assert!(Arc::ptr_eq(&first, &second));
    }
}
