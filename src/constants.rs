//! Global constants used throughout the crate.
//!
//! Naming conventions, reserved field names and configuration defaults live here so
//! that the magic strings shared by several modules are defined once.

/// Name of the abstract root of every component inheritance chain.
pub const ROOT_VARIANT_NAME: &str = "Base";

/// Conventional suffix; its first occurrence is removed from a variant's type name
/// when deriving its path.
pub const COMPONENT_SUFFIX: &str = "Component";

/// Suffix appended to an operation name by the action cache when it calls through to
/// the uncached operation. Stripped again when inferring the template name.
pub const WITHOUT_CACHING_SUFFIX: &str = "_without_caching";

/// Field names that belong to component bookkeeping and never reach a template.
pub const RESERVED_ASSIGNS: &[&str] = &["assigns_for_view", "template"];

/// Default template root, relative to the project (configuration file) directory.
pub const DEFAULT_VIEW_PATH: &str = "app/components";

/// Handler extensions recognized when no configuration overrides them.
pub const DEFAULT_HANDLERS: &[&str] = &["tera"];

/// File name of the project configuration.
pub const CONFIG_FILE_NAME: &str = "components.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "COMPONENTS_CONFIG";

/// Maximum number of "did you mean" suggestions attached to a not-found error.
pub const MAX_TEMPLATE_SUGGESTIONS: usize = 3;

/// Maximum Levenshtein distance for suggestions, as a percentage of the name length.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
