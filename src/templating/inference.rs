//! Template name inference.
//!
//! When an operation renders without naming a template, the template is named after
//! the operation itself. The operation passes its own logical name explicitly; there
//! is no call-stack inspection.
//!
//! The [`ActionCache`](super::cache::ActionCache) invokes the uncached body of an
//! operation under `<name>_without_caching`; that suffix is stripped here so cached
//! and uncached calls resolve to the same template.

use crate::constants::WITHOUT_CACHING_SUFFIX;
use crate::core::{ComponentError, Result};

/// Derive the template identifier for a render call.
///
/// An explicit name is returned unchanged, qualified or not. Otherwise the calling
/// operation's name is used, minus any `_without_caching` suffix.
///
/// # Errors
///
/// Returns [`ComponentError::Inference`] when neither an explicit name nor a
/// non-empty caller name is available. `variant` is only used for the message.
///
/// # Examples
///
/// ```
/// use component_views::templating::infer_template_name;
///
/// assert_eq!(infer_template_name("UsersComponent", None, Some("details"))?, "details");
/// assert_eq!(
///     infer_template_name("UsersComponent", None, Some("details_without_caching"))?,
///     "details"
/// );
/// assert_eq!(
///     infer_template_name("UsersComponent", Some("shared/card"), Some("details"))?,
///     "shared/card"
/// );
/// # Ok::<(), component_views::core::ComponentError>(())
/// ```
pub fn infer_template_name(
    variant: &str,
    explicit: Option<&str>,
    caller: Option<&str>,
) -> Result<String> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }

    let operation = caller.map(str::trim).filter(|op| !op.is_empty()).ok_or_else(|| {
        ComponentError::Inference {
            variant: variant.to_string(),
        }
    })?;

    let name = operation.strip_suffix(WITHOUT_CACHING_SUFFIX).unwrap_or(operation);
    if name.is_empty() {
        return Err(ComponentError::Inference {
            variant: variant.to_string(),
        });
    }

    tracing::trace!("Inferred template name '{}' from operation '{}'", name, operation);
    Ok(name.to_string())
}
