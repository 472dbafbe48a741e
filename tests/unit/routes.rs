//! Route generation.

use component_views::core::ComponentError;
use component_views::templating::RouteSet;
use serde_json::json;
use std::collections::HashMap;

#[test]
fn test_nested_route() {
    let mut routes = RouteSet::new();
    routes.insert("post_comment", "/posts/:post_id/comments/:id").unwrap();

    let params = HashMap::from([("post_id".to_string(), json!(3)), ("id".to_string(), json!("c9"))]);
    assert_eq!(routes.url_for("post_comment", &params).unwrap(), "/posts/3/comments/c9");
}

#[test]
fn test_missing_segment() {
    let mut routes = RouteSet::new();
    routes.insert("user", "/users/:id").unwrap();
    assert!(matches!(
        routes.url_for("user", &HashMap::new()),
        Err(ComponentError::RouteGeneration { .. })
    ));
}
