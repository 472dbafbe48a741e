//! Canonical path derivation for component variants.
//!
//! A variant's path names the template subdirectory it owns. It is derived from the
//! variant's type name: the first occurrence of `Component` is dropped, `::`
//! namespace separators become `/`, and capitalized compound words become lower
//! snake case.
//!
//! | Type name                     | Path                 |
//! |-------------------------------|----------------------|
//! | `UsersComponent`              | `users`              |
//! | `Admin::UserProfileComponent` | `admin/user_profile` |
//! | `HTMLWidgetComponent`         | `html_widget`        |
//!
//! Paths are computed once per variant when the registry is built; see
//! [`VariantRegistry`](super::registry::VariantRegistry).

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::COMPONENT_SUFFIX;

fn acronym_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("static regex is valid"))
}

fn word_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z\d])([A-Z])").expect("static regex is valid"))
}

/// Derive the canonical path of a variant from its type name.
///
/// # Examples
///
/// ```
/// use component_views::component::component_path;
///
/// assert_eq!(component_path("UsersComponent"), "users");
/// assert_eq!(component_path("Admin::UserProfileComponent"), "admin/user_profile");
/// ```
pub fn component_path(type_name: &str) -> String {
    let trimmed = type_name.trim();
    let stripped = trimmed.replacen(COMPONENT_SUFFIX, "", 1);
    if stripped.is_empty() {
        underscore(trimmed)
    } else {
        underscore(&stripped)
    }
}

/// Convert a `CamelCase` (optionally `::`-namespaced) name to `snake_case` with `/`
/// between namespace segments.
pub fn underscore(camel: &str) -> String {
    let word = camel.replace("::", "/");
    let word = acronym_boundary().replace_all(&word, "${1}_${2}");
    let word = word_boundary().replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}
