//! Rendering configured projects with real templates.

use anyhow::Result;
use component_views::component::{Component, ComponentState, DynamicComponent};
use component_views::config::ComponentsConfig;
use component_views::core::ComponentError;
use component_views::test_utils::{ConfigFixture, TemplateTree, init_test_logging};
use serde::Serialize;

#[derive(Serialize)]
struct LeafComponent {
    title: String,
    user_id: u64,
    #[serde(skip)]
    state: ComponentState,
}

impl Component for LeafComponent {
    fn variant_name(&self) -> &str {
        "LeafComponent"
    }

    fn component_state(&self) -> &ComponentState {
        &self.state
    }
}

fn load(tree: &TemplateTree, fixture: ConfigFixture) -> Result<ComponentsConfig> {
    let path = fixture.write_to(tree)?;
    ComponentsConfig::load_from(&path)
}

#[test]
fn test_inherited_template_renders_leaf_fields() -> Result<()> {
    init_test_logging(None);
    let tree = TemplateTree::new()?.with(
        "mid/show.tera",
        "{{ title }} by {{ controller_name() }}: {{ user_path(id=user_id) }}",
    )?;
    let renderer = load(&tree, ConfigFixture::chain())?.renderer()?;

    let leaf = LeafComponent {
        title: "Hello".into(),
        user_id: 42,
        state: ComponentState::new(),
    };
    let output = renderer.render(&leaf, Some("show"), None)?;
    assert_eq!(output, "Hello by leaf: /users/42");
    assert_eq!(leaf.component_state().template().as_deref(), Some("mid/show"));
    Ok(())
}

#[test]
fn test_format_and_locale_candidates() -> Result<()> {
    let tree = TemplateTree::new()?
        .with("admin/users/index.tera", "plain {{ name }}")?
        .with("admin/users/index.en.html.tera", "<p>{{ name }}</p>")?;
    let renderer = load(&tree, ConfigFixture::html())?.renderer()?;

    let mut users = DynamicComponent::new("Admin::UsersComponent");
    users.set("name", "A&B");
    assert_eq!(renderer.render(&users, Some("index"), None)?, "<p>A&amp;B</p>");
    Ok(())
}

#[test]
fn test_format_only_template_not_inherited() -> Result<()> {
    // The ancestor walk ignores locale and format infixes
    let tree = TemplateTree::new()?.with("mid/card.html.tera", "card")?;
    let renderer = load(&tree, ConfigFixture::chain())?.renderer()?;

    let leaf = DynamicComponent::new("LeafComponent");
    let located = renderer.resolve(&leaf, Some("card"), None)?;
    assert_eq!(located.qualified_name, "mid/card");
    assert!(!located.found);
    Ok(())
}

#[test]
fn test_missing_template_reports_roots() -> Result<()> {
    let tree = TemplateTree::new()?.with("leaf/detail.tera", "")?;
    let renderer = load(&tree, ConfigFixture::chain())?.renderer()?;

    let leaf = DynamicComponent::new("LeafComponent");
    match renderer.render(&leaf, Some("details"), None) {
        Err(ComponentError::TemplateNotFound {
            name,
            searched,
            suggestions,
        }) => {
            assert_eq!(name, "mid/details");
            assert_eq!(searched, [tree.root().to_path_buf()]);
            assert!(suggestions.is_empty(), "suggestions come from the same directory only");
        }
        other => panic!("expected TemplateNotFound, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_invalid_configuration() -> Result<()> {
    let tree = TemplateTree::new()?;
    let config = load(&tree, ConfigFixture::unknown_parent())?;
    let err = config.build_registry().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ComponentError>(),
        Some(ComponentError::UnknownVariant { name }) if name == "MissingComponent"
    ));

    assert!(load(&tree, ConfigFixture::invalid_syntax()).is_err());
    Ok(())
}

#[test]
fn test_partials_resolve_through_view_paths() -> Result<()> {
    let tree = TemplateTree::new()?
        .with("mid/show.tera", "{% for n in [1, 2] %}{% include \"shared/row\" %}{% endfor %}")?
        .with("shared/row.tera", "<{{ title }} {{ n }}>")?;
    let renderer = load(&tree, ConfigFixture::chain())?.renderer()?;

    let leaf = LeafComponent {
        title: "t".into(),
        user_id: 1,
        state: ComponentState::new(),
    };
    assert_eq!(renderer.render(&leaf, Some("show"), None)?, "<t 1><t 2>");
    Ok(())
}
