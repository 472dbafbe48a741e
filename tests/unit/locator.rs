//! Ancestor-chain lookup against real template trees.

use anyhow::Result;
use component_views::component::{VariantDefinition, VariantRegistry};
use component_views::templating::{LookupDetails, TemplateLocator};
use component_views::test_utils::TemplateTree;

fn registry(tree: &TemplateTree) -> Result<VariantRegistry> {
    Ok(VariantRegistry::builder(tree.view_paths())
        .component(VariantDefinition::new("MidComponent"))
        .component(VariantDefinition::new("LeafComponent").parent("MidComponent"))
        .component(VariantDefinition::new("Admin::UsersComponent").parent("LeafComponent"))
        .build()?)
}

fn locator(registry: &VariantRegistry) -> TemplateLocator<'_> {
    TemplateLocator::new(registry, LookupDetails::handlers_only(vec!["tera".into(), "html".into()]))
}

#[test]
fn test_inherits_through_namespaced_variant() -> Result<()> {
    let tree = TemplateTree::new()?.with("mid/index.html", "")?;
    let registry = registry(&tree)?;
    let users = registry.lookup("Admin::UsersComponent")?;

    let located = locator(&registry).locate(users, "index")?;
    assert_eq!(located.qualified_name, "mid/index");
    assert_eq!(located.owner, registry.lookup("MidComponent")?);
    assert!(located.found);
    Ok(())
}

#[test]
fn test_nearest_ancestor_wins() -> Result<()> {
    let tree = TemplateTree::new()?
        .with("mid/index.tera", "")?
        .with("leaf/index.tera", "")?;
    let registry = registry(&tree)?;
    let users = registry.lookup("Admin::UsersComponent")?;

    assert_eq!(locator(&registry).locate(users, "index")?.qualified_name, "leaf/index");
    Ok(())
}

#[test]
fn test_own_namespaced_directory() -> Result<()> {
    let tree = TemplateTree::new()?.with("admin/users/index.tera", "")?;
    let registry = registry(&tree)?;
    let users = registry.lookup("Admin::UsersComponent")?;

    assert_eq!(locator(&registry).locate(users, "index")?.qualified_name, "admin/users/index");
    Ok(())
}

#[test]
fn test_root_template_ignored() -> Result<()> {
    let tree = TemplateTree::new()?.with("base/show.tera", "")?;
    let registry = registry(&tree)?;
    let leaf = registry.lookup("LeafComponent")?;

    let located = locator(&registry).locate(leaf, "show")?;
    assert_eq!(located.qualified_name, "mid/show");
    assert!(!located.found);
    Ok(())
}

#[test]
fn test_unknown_handler_not_found() -> Result<()> {
    let tree = TemplateTree::new()?.with("mid/show.erb", "")?;
    let registry = registry(&tree)?;
    let leaf = registry.lookup("LeafComponent")?;

    let located = locator(&registry).locate(leaf, "show")?;
    assert!(!located.found);
    Ok(())
}

#[test]
fn test_second_root_is_searched() -> Result<()> {
    let first = TemplateTree::new()?;
    let second = TemplateTree::new()?.with("mid/show.tera", "")?;
    let paths = component_views::templating::ViewPaths::new(vec![
        first.root().to_path_buf(),
        second.root().to_path_buf(),
    ]);
    let registry = VariantRegistry::builder(paths)
        .component(VariantDefinition::new("MidComponent"))
        .component(VariantDefinition::new("LeafComponent").parent("MidComponent"))
        .build()?;
    let leaf = registry.lookup("LeafComponent")?;

    let located = locator(&registry).locate(leaf, "show")?;
    assert_eq!(located.qualified_name, "mid/show");
    assert!(located.found);
    Ok(())
}
