//! Canonical path derivation through the public API.

use component_views::component::{VariantDefinition, VariantRegistry, component_path};
use component_views::templating::ViewPaths;

#[test]
fn test_paths_match_registry() {
    let names = [
        ("UsersComponent", "users"),
        ("Admin::UsersComponent", "admin/users"),
        ("UserProfileComponent", "user_profile"),
        ("HTMLWidgetComponent", "html_widget"),
    ];

    let registry = VariantRegistry::builder(ViewPaths::default())
        .components(names.iter().map(|(name, _)| VariantDefinition::new(*name)))
        .build()
        .unwrap();

    for (name, path) in names {
        assert_eq!(component_path(name), path);
        assert_eq!(registry.path(registry.lookup(name).unwrap()), path);
    }
}

#[test]
fn test_path_is_stable() {
    let first = component_path("Admin::Billing::InvoiceListComponent");
    for _ in 0..5 {
        assert_eq!(component_path("Admin::Billing::InvoiceListComponent"), first);
    }
    assert_eq!(first, "admin/billing/invoice_list");
}

#[test]
fn test_first_component_occurrence_removed() {
    assert_eq!(component_path("ComponentListComponent"), "list_component");
    assert_eq!(component_path("Component"), "component");
}
