//! The action cache wrapped around renders.

use anyhow::Result;
use component_views::component::DynamicComponent;
use component_views::config::ComponentsConfig;
use component_views::templating::ActionCache;
use component_views::test_utils::{ConfigFixture, TemplateTree};
use std::sync::Arc;
use std::thread;

#[test]
fn test_cached_render_uses_action_template() -> Result<()> {
    let tree = TemplateTree::new()?.with("mid/details.tera", "details for {{ id }}")?;
    let config = ComponentsConfig::load_from(&ConfigFixture::chain().write_to(&tree)?)?;
    let renderer = config.renderer()?;
    let cache = ActionCache::new();

    let mut leaf = DynamicComponent::new("LeafComponent");
    leaf.set("id", 1);
    assert_eq!(renderer.render_cached(&cache, &leaf, "details", "1")?, "details for 1");

    // The template changes but the cached output is served
    tree.add("mid/details.tera", "changed")?;
    assert_eq!(renderer.render_cached(&cache, &leaf, "details", "1")?, "details for 1");
    assert_eq!(cache.stats().0, 1);
    Ok(())
}

#[test]
fn test_cache_shared_between_threads() -> Result<()> {
    let tree = TemplateTree::new()?.with("mid/row.tera", "row {{ n }}")?;
    let config = ComponentsConfig::load_from(&ConfigFixture::chain().write_to(&tree)?)?;
    let renderer = Arc::new(config.renderer()?);
    let cache = Arc::new(ActionCache::new());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let renderer = Arc::clone(&renderer);
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut leaf = DynamicComponent::new("LeafComponent");
                leaf.set("n", n);
                renderer.render_cached(&cache, &leaf, "row", &n.to_string())
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().expect("thread panicked")?, format!("row {n}"));
    }
    assert_eq!(cache.len(), 4);
    Ok(())
}
