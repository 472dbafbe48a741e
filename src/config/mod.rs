//! Project configuration (`components.toml`).
//!
//! The configuration names the template roots, the recognized template file
//! extensions, the routes shared by every component and the component hierarchy:
//!
//! ```toml
//! view_paths = ["app/components"]      # relative to this file's directory; ~ and $VARS expanded
//! handlers   = ["tera"]                # handler extensions, in priority order
//! formats    = ["html", "text"]        # format infixes the engine tries, in priority order
//! locale     = "en"                    # optional locale infix
//!
//! [routes]
//! user = "/users/:id"
//!
//! [[components]]
//! name = "MidComponent"
//!
//! [[components]]
//! name = "LeafComponent"
//! parent = "MidComponent"              # defaults to the root "Base"
//! ```
//!
//! # Location
//!
//! In order of precedence:
//! 1. an explicit path (`--config`)
//! 2. the `COMPONENTS_CONFIG` environment variable
//! 3. `components.toml` in the current directory
//! 4. built-in defaults rooted at the current directory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::component::{VariantDefinition, VariantRegistry};
use crate::constants::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_HANDLERS, DEFAULT_VIEW_PATH};
use crate::core::ComponentError;
use crate::templating::{ComponentRenderer, LookupDetails, RouteSet, TeraEngine, ViewPaths};

/// One `[[components]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    /// Variant type name, e.g. `Admin::UsersComponent`
    pub name: String,
    /// Parent variant; the root when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Contents of `components.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentsConfig {
    /// Template roots, searched in order
    pub view_paths: Vec<String>,
    /// Handler extensions, most preferred first
    pub handlers: Vec<String>,
    /// Format infixes the engine tries, most preferred first
    pub formats: Vec<String>,
    /// Optional locale infix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Route name → pattern
    pub routes: BTreeMap<String, String>,
    /// Component hierarchy
    pub components: Vec<ComponentConfig>,
    /// Directory relative view paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            view_paths: vec![DEFAULT_VIEW_PATH.to_string()],
            handlers: DEFAULT_HANDLERS.iter().map(|h| (*h).to_string()).collect(),
            formats: Vec::new(),
            locale: None,
            routes: BTreeMap::new(),
            components: Vec::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl ComponentsConfig {
    /// Locate and load the configuration.
    ///
    /// An explicit path or the environment variable must point at an existing file.
    /// Without either, `components.toml` in the current directory is used if present,
    /// otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.trim().is_empty()
        {
            tracing::debug!("Using configuration from ${}", CONFIG_ENV_VAR);
            return Self::load_from(Path::new(&path));
        }

        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        let local = current_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            Self::load_from(&local)
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(Self::default().with_base_dir(current_dir))
        }
    }

    /// Load and validate a specific file. Relative view paths resolve against the
    /// file's directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration from {}", path.display()))?;

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let config = config.with_base_dir(base_dir);
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        tracing::debug!(
            "Loaded configuration from {} ({} component(s))",
            path.display(),
            config.components.len()
        );
        Ok(config)
    }

    /// Parse configuration text, resolving relative paths against `base_dir`.
    pub fn from_toml(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse configuration")?;
        let config = config.with_base_dir(base_dir);
        config.validate()?;
        Ok(config)
    }

    /// Replace the directory relative view paths are resolved against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Directory relative view paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Check the values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::ConfigError`] for empty lists, dotted or empty
    /// extensions and unnamed components. Hierarchy problems are reported by
    /// [`build_registry`](Self::build_registry).
    pub fn validate(&self) -> Result<(), ComponentError> {
        let invalid = |message: String| Err(ComponentError::ConfigError {
            message,
        });

        if self.view_paths.is_empty() {
            return invalid("view_paths must list at least one directory".to_string());
        }
        if self.handlers.is_empty() {
            return invalid("handlers must list at least one extension".to_string());
        }
        for (field, values) in [("handlers", &self.handlers), ("formats", &self.formats)] {
            if let Some(bad) = values.iter().find(|v| v.is_empty() || v.contains('.')) {
                return invalid(format!("{field} entry '{bad}' must be a bare extension like 'tera'"));
            }
        }
        if let Some(locale) = &self.locale
            && (locale.is_empty() || locale.contains('.'))
        {
            return invalid(format!("locale '{locale}' must be a bare name like 'en'"));
        }
        if self.components.iter().any(|c| c.name.trim().is_empty()) {
            return invalid("every [[components]] entry needs a name".to_string());
        }
        Ok(())
    }

    /// Template roots with `~`/environment variables expanded and relative entries
    /// joined onto the base directory.
    pub fn resolved_view_paths(&self) -> Result<ViewPaths> {
        let roots = self
            .view_paths
            .iter()
            .map(|entry| {
                let expanded = shellexpand::full(entry)
                    .with_context(|| format!("Failed to expand view path '{entry}'"))?;
                let path = PathBuf::from(expanded.as_ref());
                Ok(if path.is_absolute() {
                    path
                } else {
                    self.base_dir.join(path)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ViewPaths::new(roots))
    }

    /// Qualifiers for the ancestor walk: configured handlers, no locale or format.
    pub fn existence_details(&self) -> LookupDetails {
        LookupDetails::handlers_only(self.handlers.clone())
    }

    /// Qualifiers for the engine: configured locale, formats and handlers.
    pub fn engine_details(&self) -> LookupDetails {
        LookupDetails::new(
            self.locale.iter().cloned().collect(),
            self.formats.clone(),
            self.handlers.clone(),
        )
    }

    /// The configured routes.
    pub fn route_set(&self) -> Result<RouteSet, ComponentError> {
        let mut routes = RouteSet::new();
        for (name, pattern) in &self.routes {
            routes.insert(name, pattern)?;
        }
        Ok(routes)
    }

    /// Build the variant registry described by the configuration.
    pub fn build_registry(&self) -> Result<VariantRegistry> {
        let definitions = self.components.iter().map(|c| {
            let definition = VariantDefinition::new(&c.name);
            match &c.parent {
                Some(parent) => definition.parent(parent),
                None => definition,
            }
        });

        let registry = VariantRegistry::builder(self.resolved_view_paths()?)
            .routes(self.route_set()?)
            .components(definitions)
            .build()?;
        Ok(registry)
    }

    /// A Tera-backed renderer for the configured project.
    pub fn renderer(&self) -> Result<ComponentRenderer<TeraEngine>> {
        let registry = Arc::new(self.build_registry()?);
        Ok(ComponentRenderer::with_engine(
            registry,
            TeraEngine::new(self.engine_details()),
            self.existence_details(),
        ))
    }
}
