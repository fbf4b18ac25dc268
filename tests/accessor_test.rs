//! Integration tests for dotted-path access.

use serde_json::{json, Value};
use usecase_core::PathAccessor;

fn tree() -> Value {
    json!({
        "user": {
            "name": "Ada",
            "address": { "city": "London", "zip": null },
            "roles": [{ "name": "admin" }, { "name": "ops" }]
        },
        "count": 0
    })
}

#[test]
fn test_leaf_and_intermediate_values() {
    let tree = tree();
    let accessor = PathAccessor::new();

    assert_eq!(accessor.get(&tree, "user.address.city"), Some(&json!("London")));
    assert_eq!(
        accessor.get(&tree, "user.address"),
        Some(&json!({ "city": "London", "zip": null }))
    );
    assert_eq!(accessor.get(&tree, "count"), Some(&json!(0)));
}

#[test]
fn test_default_when_unresolved() {
    let tree = tree();
    let accessor = PathAccessor::new();
    let default = json!("fallback");

    for path in ["missing", "user.missing", "user.name.first", "user.roles.9.name", "count.x"] {
        assert_eq!(accessor.get_or(&tree, path, &default), &default, "path {}", path);
    }
}

#[test]
fn test_present_null_is_not_defaulted() {
    let tree = tree();
    let default = json!("fallback");
    assert_eq!(
        PathAccessor::new().get_or(&tree, "user.address.zip", &default),
        &Value::Null
    );
}

#[test]
fn test_list_indices() {
    let tree = tree();
    let accessor = PathAccessor::new();
    assert_eq!(accessor.get(&tree, "user.roles.0.name"), Some(&json!("admin")));
    assert_eq!(accessor.get(&tree, "user.roles.-1.name"), None);
}

#[test]
fn test_separator_option() {
    let tree = tree();
    let accessor = PathAccessor::new().with_separator(':');
    assert_eq!(accessor.separator(), ':');
    assert_eq!(accessor.get(&tree, "user:address:city"), Some(&json!("London")));
    assert_eq!(accessor.get(&tree, "user.address.city"), None);
}

#[test]
fn test_does_not_mutate_root() {
    let tree = tree();
    let before = tree.clone();
    let _ = PathAccessor::new().get(&tree, "user.roles.1");
    assert_eq!(tree, before);
}
