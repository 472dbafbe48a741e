//! Projection of component state into template variables.
//!
//! Every exposed field of a component becomes a template variable. Exposed fields are
//! exactly what the component serializes: bookkeeping lives in
//! [`ComponentState`](crate::component::ComponentState), which cannot be serialized,
//! and the reserved names `assigns_for_view` and `template` are dropped for components
//! whose fields are only known at runtime. A leading `@` is stripped; a component
//! exposing both `@a` and `a` is rejected rather than letting one shadow the other.
//!
//! The projection is a snapshot taken on first use and memoized on the instance, so
//! later renders of the same instance see the same variables.

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::component::Component;
use crate::constants::RESERVED_ASSIGNS;
use crate::core::{ComponentError, Result};

/// Template variables: field name → value.
pub type Assigns = Map<String, Value>;

/// Project a component's exposed fields, reusing an earlier projection if present.
///
/// # Errors
///
/// Returns [`ComponentError::InvalidAssigns`] if the component does not serialize to
/// a map of named fields, or if a field appears both with and without the `@` sigil.
pub fn project<C>(component: &C) -> Result<Arc<Assigns>>
where
    C: Component + Serialize,
{
    let state = component.component_state();
    if let Some(assigns) = state.assigns_for_view() {
        return Ok(assigns);
    }

    let assigns = Arc::new(snapshot(component)?);
    tracing::debug!(
        "Projected {} variable(s) from {}",
        assigns.len(),
        component.variant_name()
    );
    Ok(state.memoize_assigns(assigns))
}

/// Serialize the exposed fields without touching the memoized projection.
fn snapshot<C>(component: &C) -> Result<Assigns>
where
    C: Component + Serialize,
{
    let invalid = |reason: String| ComponentError::InvalidAssigns {
        variant: component.variant_name().to_string(),
        reason,
    };

    let value = serde_json::to_value(component).map_err(|e| invalid(e.to_string()))?;
    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(invalid(format!("expected named fields, found {}", kind_of(&other))));
        }
    };

    let mut assigns = Assigns::new();
    for (name, value) in fields {
        let name = match name.strip_prefix('@') {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        if RESERVED_ASSIGNS.contains(&name.as_str()) {
            continue;
        }
        // `@a` and `a` would both become `a`
        if assigns.contains_key(&name) {
            return Err(invalid(format!("field '{name}' is exposed twice, with and without '@'")));
        }
        assigns.insert(name, value);
    }
    Ok(assigns)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
