//! Routing and view helper capabilities.
//!
//! Two collaborators supply the functions templates can call besides their
//! variables:
//!
//! - [`RouteSet`] - named routes such as `user = "/users/:id"`, exposed as
//!   `url_for(route="user", id=5)` and `user_path(id=5)`
//! - [`HelperModule`] - a named group of Tera filters and functions, attached to a
//!   variant and inherited by its descendants
//!
//! Both are installed into a fresh Tera instance for every render by the
//! [`ViewContext`](super::context::ViewContext).
//!
//! # Examples
//!
//! ```rust
//! use component_views::templating::{HelperModule, RouteSet};
//! use std::collections::HashMap;
//!
//! let mut routes = RouteSet::new();
//! routes.insert("user", "/users/:id")?;
//! let url = routes.url_for("user", &HashMap::from([("id".to_string(), 5.into())]))?;
//! assert_eq!(url, "/users/5");
//!
//! let helpers = HelperModule::new("text").filter("shout", |value: &tera::Value, _: &HashMap<String, tera::Value>| {
//!     Ok(tera::Value::String(value.as_str().unwrap_or_default().to_uppercase()))
//! });
//! # Ok::<(), component_views::core::ComponentError>(())
//! ```

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tera::Tera;

use super::context::BaseContext;
use crate::core::{ComponentError, Result};

/// A general helper capability installed into every render of a variant.
pub trait ViewHelper: Send + Sync {
    /// Name used in logs and listings.
    fn name(&self) -> &str;

    /// Register filters/functions on `tera`. `view` gives access to the invoking
    /// component's context for helpers that need it.
    fn install(&self, tera: &mut Tera, view: &dyn BaseContext);
}

/// Shares a boxed filter between renders.
struct SharedFilter(Arc<dyn tera::Filter>);

impl tera::Filter for SharedFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.filter(value, args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}

/// Shares a boxed function between renders.
struct SharedFunction(Arc<dyn tera::Function>);

impl tera::Function for SharedFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.call(args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}

/// Named group of Tera filters and functions.
#[derive(Clone)]
pub struct HelperModule {
    name: String,
    filters: Vec<(String, Arc<dyn tera::Filter>)>,
    functions: Vec<(String, Arc<dyn tera::Function>)>,
}

impl HelperModule {
    /// Empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filters: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Add a filter, usable as `{{ value | name }}`.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, filter: impl tera::Filter + 'static) -> Self {
        self.filters.push((name.into(), Arc::new(filter)));
        self
    }

    /// Add a function, usable as `{{ name(arg=...) }}`.
    #[must_use]
    pub fn function(
        mut self,
        name: impl Into<String>,
        function: impl tera::Function + 'static,
    ) -> Self {
        self.functions.push((name.into(), Arc::new(function)));
        self
    }
}

impl ViewHelper for HelperModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn install(&self, tera: &mut Tera, _view: &dyn BaseContext) {
        for (name, filter) in &self.filters {
            tera.register_filter(name, SharedFilter(Arc::clone(filter)));
        }
        for (name, function) in &self.functions {
            tera.register_function(name, SharedFunction(Arc::clone(function)));
        }
    }
}

impl fmt::Debug for HelperModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperModule")
            .field("name", &self.name)
            .field("filters", &self.filters.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("functions", &self.functions.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}

/// One named route with `:param` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    name: String,
    pattern: String,
    params: Vec<String>,
}

impl Route {
    /// Parse a route pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::ConfigError`] if the name is not a valid identifier
    /// (it becomes a template function name) or the pattern does not start with `/`.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let pattern = pattern.into();

        let valid_name = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(ComponentError::ConfigError {
                message: format!("route name '{name}' must be an identifier"),
            });
        }
        if !pattern.starts_with('/') {
            return Err(ComponentError::ConfigError {
                message: format!("route '{name}' pattern '{pattern}' must start with '/'"),
            });
        }

        let params = pattern
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .map(str::to_string)
            .collect();

        Ok(Self {
            name,
            pattern,
            params,
        })
    }

    /// Route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Original pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder names, in pattern order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Fill in the placeholders. Arguments that match no placeholder are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::RouteGeneration`] when a placeholder has no value or
    /// the value is not a string, number or boolean.
    pub fn generate(&self, args: &HashMap<String, Value>) -> Result<String> {
        let segments: Result<Vec<String>> = self
            .pattern
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                None => Ok(segment.to_string()),
                Some(param) => {
                    let value = args.get(param).ok_or_else(|| ComponentError::RouteGeneration {
                        route: self.name.clone(),
                        reason: format!("missing required parameter '{param}'"),
                    })?;
                    segment_value(value).ok_or_else(|| ComponentError::RouteGeneration {
                        route: self.name.clone(),
                        reason: format!("parameter '{param}' must be a string, number or boolean"),
                    })
                }
            })
            .collect();
        Ok(segments?.join("/"))
    }
}

fn segment_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Named routes shared by every variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet {
    routes: BTreeMap<String, Route>,
}

impl RouteSet {
    /// Empty route set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a route.
    ///
    /// # Errors
    ///
    /// See [`Route::new`].
    pub fn insert(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> Result<()> {
        let route = Route::new(name, pattern)?;
        self.routes.insert(route.name.clone(), route);
        Ok(())
    }

    /// Look a route up by name.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Generate the URL of a named route.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::RouteGeneration`] for unknown routes or missing
    /// parameters.
    pub fn url_for(&self, name: &str, args: &HashMap<String, Value>) -> Result<String> {
        self.get(name)
            .ok_or_else(|| ComponentError::RouteGeneration {
                route: name.to_string(),
                reason: "no such route".to_string(),
            })?
            .generate(args)
    }

    /// Routes ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are defined.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Register `url_for` and one `<name>_path` function per route.
    pub fn install(self: &Arc<Self>, tera: &mut Tera) {
        let routes = Arc::clone(self);
        tera.register_function("url_for", move |args: &HashMap<String, Value>| {
            let name = args
                .get("route")
                .and_then(Value::as_str)
                .ok_or_else(|| tera::Error::msg("url_for requires a string 'route' argument"))?;
            routes.url_for(name, args).map(Value::String).map_err(|e| tera::Error::msg(e.to_string()))
        });

        for route in self.routes.values() {
            let route = route.clone();
            let function_name = format!("{}_path", route.name);
            tera.register_function(&function_name, move |args: &HashMap<String, Value>| {
                route.generate(args).map(Value::String).map_err(|e| tera::Error::msg(e.to_string()))
            });
        }
    }
}
