//! Projection of component state into template variables.

use component_views::component::{Component, ComponentState, DynamicComponent};
use component_views::templating::project;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct CardComponent {
    title: String,
    tags: Vec<String>,
    owner: Option<String>,
    #[serde(skip)]
    state: ComponentState,
}

impl Component for CardComponent {
    fn variant_name(&self) -> &str {
        "CardComponent"
    }

    fn component_state(&self) -> &ComponentState {
        &self.state
    }
}

#[test]
fn test_values_are_not_coerced() {
    let card = CardComponent {
        title: "Hi".into(),
        tags: vec!["a".into(), "b".into()],
        owner: None,
        state: ComponentState::new(),
    };
    let assigns = project(&card).unwrap();
    assert_eq!(
        Value::Object((*assigns).clone()),
        json!({"title": "Hi", "tags": ["a", "b"], "owner": null})
    );
}

#[test]
fn test_denylist_and_sigils() {
    let Value::Object(fields) = json!({
        "@a": 1,
        "@assigns_for_view": {"cached": true},
        "@template": "X",
        "@b": "x",
    }) else {
        unreachable!()
    };
    let component = DynamicComponent::with_fields("LeafComponent", fields);
    let assigns = project(&component).unwrap();
    assert_eq!(Value::Object((*assigns).clone()), json!({"a": 1, "b": "x"}));
}

#[test]
fn test_projection_memoized_on_instance() {
    let mut component = DynamicComponent::new("LeafComponent");
    component.set("n", 1);
    let first = project(&component).unwrap();
    assert!(component.component_state().assigns_for_view().is_some());

    component.set("n", 2);
    assert_eq!(project(&component).unwrap(), first);
}
