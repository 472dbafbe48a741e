//! Template name inference.

use component_views::core::ComponentError;
use component_views::templating::infer_template_name;

#[test]
fn test_operation_name_becomes_template() {
    assert_eq!(infer_template_name("UsersComponent", None, Some("index")).unwrap(), "index");
}

#[test]
fn test_cache_wrapper_suffix_is_stripped() {
    assert_eq!(
        infer_template_name("UsersComponent", None, Some("details_without_caching")).unwrap(),
        "details"
    );
}

#[test]
fn test_explicit_name_is_untouched() {
    assert_eq!(
        infer_template_name("UsersComponent", Some("details_without_caching"), None).unwrap(),
        "details_without_caching"
    );
}

#[test]
fn test_no_caller_is_an_error() {
    assert!(matches!(
        infer_template_name("UsersComponent", None, None),
        Err(ComponentError::Inference { .. })
    ));
}
