//! Dotted-path reads over nested payload trees.
//!
//! [`PathAccessor`] resolves a path such as `user.address.city` one segment at
//! a time. Objects are looked up by key, arrays by decimal index. The first
//! segment that does not resolve ends the walk and the caller's default is
//! returned; a fully resolved path yields the stored value itself.

use serde_json::{Map, Value};

use crate::path::{FieldPath, SEPARATOR};

/// Reads values out of nested trees by dotted path.
///
/// # Example
///
/// ```rust
/// use usecase_core::PathAccessor;
/// use serde_json::json;
///
/// let tree = json!({ "user": { "tags": ["admin", "ops"] } });
/// let accessor = PathAccessor::new();
///
/// assert_eq!(accessor.get(&tree, "user.tags.1"), Some(&json!("ops")));
/// assert_eq!(accessor.get(&tree, "user.name"), None);
///
/// let fallback = json!("anonymous");
/// assert_eq!(accessor.get_or(&tree, "user.name", &fallback), &fallback);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathAccessor {
    separator: char,
}

impl PathAccessor {
    /// Creates an accessor splitting paths on `.`.
    pub fn new() -> Self {
        Self {
            separator: SEPARATOR,
        }
    }

    /// Sets the separator used to split paths.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Resolves `path` inside `root`.
    ///
    /// Returns None as soon as a segment names a missing key, an out-of-range
    /// or non-numeric array index, or descends into a scalar.
    pub fn get<'a>(&self, root: &'a Value, path: &str) -> Option<&'a Value> {
        self.parse(path)
            .segments()
            .try_fold(root, |current, segment| step(current, segment))
    }

    /// Resolves `path` inside `root`, falling back to `default`.
    pub fn get_or<'a>(&self, root: &'a Value, path: &str, default: &'a Value) -> &'a Value {
        self.get(root, path).unwrap_or(default)
    }

    /// Resolves `path` inside a mapping root.
    pub fn get_in<'a>(&self, root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
        let path = self.parse(path);
        let mut segments = path.segments();
        let first = segments.next().and_then(|segment| root.get(segment))?;
        segments.try_fold(first, |current, segment| step(current, segment))
    }

    /// Resolves `path` inside a mapping root, falling back to `default`.
    pub fn get_in_or<'a>(
        &self,
        root: &'a Map<String, Value>,
        path: &str,
        default: &'a Value,
    ) -> &'a Value {
        self.get_in(root, path).unwrap_or(default)
    }

    fn parse(&self, path: &str) -> FieldPath {
        FieldPath::parse_with(path, self.separator)
    }
}

impl Default for PathAccessor {
    fn default() -> Self {
        Self::new()
    }
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(obj) => obj.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolves_nested_object() {
        let tree = json!({ "a": { "b": { "c": 42 } } });
        assert_eq!(PathAccessor::new().get(&tree, "a.b.c"), Some(&json!(42)));
    }

    #[test]
    fn test_intermediate_nodes_are_returned_whole() {
        let tree = json!({ "a": { "b": { "c": 42 } } });
        assert_eq!(PathAccessor::new().get(&tree, "a.b"), Some(&json!({ "c": 42 })));
    }

    #[test]
    fn test_missing_key_short_circuits() {
        let tree = json!({ "a": { "b": 1 } });
        let default = json!("fallback");
        let accessor = PathAccessor::new();
        assert_eq!(accessor.get_or(&tree, "a.x.b", &default), &default);
        assert_eq!(accessor.get_or(&tree, "x", &default), &default);
    }

    #[test]
    fn test_scalar_with_segments_left_is_default() {
        let tree = json!({ "a": "text" });
        assert_eq!(PathAccessor::new().get(&tree, "a.length"), None);
    }

    #[test]
    fn test_array_index_segments() {
        let tree = json!({ "items": [{ "name": "first" }, { "name": "second" }] });
        let accessor = PathAccessor::new();
        assert_eq!(accessor.get(&tree, "items.1.name"), Some(&json!("second")));
        assert_eq!(accessor.get(&tree, "items.2.name"), None);
        assert_eq!(accessor.get(&tree, "items.first"), None);
    }

    #[test]
    fn test_present_null_is_returned() {
        let tree = json!({ "a": null });
        let default = json!(0);
        assert_eq!(PathAccessor::new().get_or(&tree, "a", &default), &Value::Null);
    }

    #[test]
    fn test_empty_path_looks_up_empty_key() {
        let accessor = PathAccessor::new();
        assert_eq!(accessor.get(&json!({ "a": 1 }), ""), None);
        assert_eq!(accessor.get(&json!({ "": 1 }), ""), Some(&json!(1)));
    }

    #[test]
    fn test_custom_separator() {
        let tree = json!({ "a.b": { "c": true } });
        let accessor = PathAccessor::new().with_separator('/');
        assert_eq!(accessor.get(&tree, "a.b/c"), Some(&json!(true)));
    }

    #[test]
    fn test_map_root() {
        let tree = json!({ "a": { "b": [10, 20] } });
        let root = tree.as_object().unwrap();
        let default = json!(-1);
        let accessor = PathAccessor::new();
        assert_eq!(accessor.get_in(root, "a.b.0"), Some(&json!(10)));
        assert_eq!(accessor.get_in_or(root, "a.c", &default), &default);
    }
}
