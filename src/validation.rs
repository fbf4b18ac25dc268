//! Default-deny schema validation.
//!
//! [`SchemaValidator`] walks a payload against a [`Schema`] and classifies every
//! field, at any depth, as accepted, missing or unauthorized. It never fails and
//! never mutates its inputs: the outcome is always a [`ValidationResult`] value,
//! and only the request layer turns a non-empty result into an error.
//!
//! Two passes run independently:
//!
//! - the unauthorized pass walks the payload in its own order and reports every
//!   key the schema does not declare at that depth;
//! - the missing pass walks the schema in declaration order and reports every
//!   required field the payload lacks, plus every nested field whose payload
//!   value is not nested.
//!
//! A nested spec facing a scalar value is always a missing-field report and is
//! never descended into.

use std::borrow::Cow;
use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::path::FieldPath;
use crate::schema::{FieldSpec, Schema};

/// Why a field was reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingReason {
    /// A required field is absent.
    Required,
    /// A nested field is absent, or present with a value that is not nested.
    TypeMismatch,
}

impl MissingReason {
    pub fn as_str(self) -> &'static str {
        match self {
            MissingReason::Required => "required",
            MissingReason::TypeMismatch => "required field type not matching array",
        }
    }
}

impl Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification produced by one validation call.
///
/// Both collections are keyed by dotted path. Missing fields keep schema
/// declaration order; unauthorized fields keep payload order.
///
/// Results from sibling subtrees merge with [`Semigroup::combine`], which
/// appends the right-hand entries after the left-hand ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    missing_fields: IndexMap<String, MissingReason>,
    unauthorized_fields: Vec<String>,
}

impl ValidationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing is missing and nothing is unauthorized.
    pub fn is_valid(&self) -> bool {
        self.missing_fields.is_empty() && self.unauthorized_fields.is_empty()
    }

    /// Missing fields by dotted path.
    pub fn missing_fields(&self) -> &IndexMap<String, MissingReason> {
        &self.missing_fields
    }

    /// Unauthorized dotted paths in payload order.
    pub fn unauthorized_fields(&self) -> &[String] {
        &self.unauthorized_fields
    }

    /// Renders missing fields as a `{path: reason}` tree.
    pub fn missing_fields_tree(&self) -> Map<String, Value> {
        self.missing_fields
            .iter()
            .map(|(path, reason)| (path.clone(), Value::from(reason.as_str())))
            .collect()
    }

    /// Renders unauthorized fields as a JSON array of paths.
    pub fn unauthorized_fields_tree(&self) -> Value {
        Value::from(self.unauthorized_fields.clone())
    }

    fn push_missing(&mut self, path: &FieldPath, reason: MissingReason) {
        self.missing_fields.insert(path.to_string(), reason);
    }

    fn push_unauthorized(&mut self, path: &FieldPath) {
        self.unauthorized_fields.push(path.to_string());
    }
}

impl Semigroup for ValidationResult {
    fn combine(mut self, other: Self) -> Self {
        self.missing_fields.extend(other.missing_fields);
        self.unauthorized_fields.extend(other.unauthorized_fields);
        self
    }
}

/// A payload value that can be descended into.
///
/// Arrays are treated as mappings keyed by their decimal indices.
#[derive(Clone, Copy)]
enum Nested<'a> {
    Object(&'a Map<String, Value>),
    List(&'a [Value]),
}

impl<'a> Nested<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(obj) => Some(Nested::Object(obj)),
            Value::Array(items) => Some(Nested::List(items)),
            _ => None,
        }
    }

    fn get(self, key: &str) -> Option<&'a Value> {
        match self {
            Nested::Object(obj) => obj.get(key),
            Nested::List(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        }
    }

    fn entries(self) -> Box<dyn Iterator<Item = (Cow<'a, str>, &'a Value)> + 'a> {
        match self {
            Nested::Object(obj) => Box::new(obj.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v))),
            Nested::List(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, v)| (Cow::Owned(idx.to_string()), v)),
            ),
        }
    }
}

/// Classifies payload fields against a schema.
///
/// The validator holds no state; one instance can be shared freely across
/// threads.
///
/// # Example
///
/// ```rust
/// use usecase_core::{MissingReason, Schema, SchemaValidator};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .required("a")
///     .nested("b", Schema::new().required("c"));
///
/// let payload = json!({ "a": 1, "b": {}, "z": "x" });
/// let result = SchemaValidator::new().validate(&schema, payload.as_object().unwrap());
///
/// assert_eq!(result.unauthorized_fields(), ["z"]);
/// assert_eq!(result.missing_fields().get("b.c"), Some(&MissingReason::Required));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates `payload` against `schema`.
    pub fn validate(&self, schema: &Schema, payload: &Map<String, Value>) -> ValidationResult {
        let root = Nested::Object(payload);
        let path = FieldPath::root();
        self.find_unauthorized(schema, root, &path)
            .combine(self.find_missing(schema, root, &path))
    }

    fn find_unauthorized(&self, schema: &Schema, payload: Nested<'_>, prefix: &FieldPath) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (key, value) in payload.entries() {
            let field_path = prefix.push(&*key);
            match schema.get(&key) {
                None => result.push_unauthorized(&field_path),
                Some(FieldSpec::Node(child)) => {
                    if let Some(nested) = Nested::of(value) {
                        result = result.combine(self.find_unauthorized(child, nested, &field_path));
                    }
                }
                // A leaf spec accepts whatever the payload holds, nested or not.
                Some(FieldSpec::Leaf(_)) => {}
            }
        }

        result
    }

    fn find_missing(&self, schema: &Schema, payload: Nested<'_>, prefix: &FieldPath) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (name, spec) in schema.iter() {
            let field_path = prefix.push(name);
            match (spec, payload.get(name)) {
                (FieldSpec::Leaf(true), None) => {
                    result.push_missing(&field_path, MissingReason::Required);
                }
                (FieldSpec::Node(_), None) if spec.is_required() => {
                    result.push_missing(&field_path, MissingReason::TypeMismatch);
                }
                (FieldSpec::Node(child), Some(value)) => match Nested::of(value) {
                    Some(nested) => {
                        result = result.combine(self.find_missing(child, nested, &field_path));
                    }
                    None => result.push_missing(&field_path, MissingReason::TypeMismatch),
                },
                _ => {}
            }
        }

        result
    }
}

/// Validates `payload` against `schema` with a default [`SchemaValidator`].
pub fn validate(schema: &Schema, payload: &Map<String, Value>) -> ValidationResult {
    SchemaValidator::new().validate(schema, payload)
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaValidator>();
    assert_sync::<SchemaValidator>();
    assert_send::<ValidationResult>();
    assert_sync::<ValidationResult>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(schema: &Schema, payload: Value) -> ValidationResult {
        validate(schema, payload.as_object().unwrap())
    }

    #[test]
    fn test_valid_payload_is_empty() {
        let schema = Schema::new().required("a").optional("b");
        let result = run(&schema, json!({ "a": 1, "b": 2 }));
        assert!(result.is_valid());
    }

    #[test]
    fn test_optional_absent_reports_nothing() {
        let schema = Schema::new().required("a").optional("b");
        assert!(run(&schema, json!({ "a": 1 })).is_valid());
    }

    #[test]
    fn test_missing_required_leaf() {
        let schema = Schema::new().required("a").required("b");
        let result = run(&schema, json!({ "a": 1 }));
        assert_eq!(result.missing_fields().len(), 1);
        assert_eq!(result.missing_fields()["b"], MissingReason::Required);
    }

    #[test]
    fn test_missing_nested_field_is_type_mismatch() {
        let schema = Schema::new().nested("b", Schema::new().required("c"));
        let result = run(&schema, json!({}));
        assert_eq!(result.missing_fields()["b"], MissingReason::TypeMismatch);
    }

    #[test]
    fn test_absent_empty_nested_schema_is_optional() {
        let schema = Schema::new().nested("b", Schema::new());
        assert!(run(&schema, json!({})).is_valid());
    }

    #[test]
    fn test_scalar_for_nested_spec_stops_descent() {
        let schema = Schema::new().nested("b", Schema::new().required("c").required("d"));
        let result = run(&schema, json!({ "b": 1 }));
        assert_eq!(result.missing_fields().len(), 1);
        assert_eq!(result.missing_fields()["b"], MissingReason::TypeMismatch);
        assert!(result.unauthorized_fields().is_empty());
    }

    #[test]
    fn test_null_for_nested_spec_is_type_mismatch() {
        let schema = Schema::new().nested("b", Schema::new().optional("c"));
        let result = run(&schema, json!({ "b": null }));
        assert_eq!(result.missing_fields()["b"], MissingReason::TypeMismatch);
    }

    #[test]
    fn test_nested_value_for_leaf_spec_is_accepted() {
        let schema = Schema::new().required("a");
        let result = run(&schema, json!({ "a": { "anything": [1, 2, 3] } }));
        assert!(result.is_valid());
    }

    #[test]
    fn test_unauthorized_nested_path() {
        let schema = Schema::new().nested("a", Schema::new().required("b"));
        let result = run(&schema, json!({ "a": { "b": 1, "c": 2 } }));
        assert_eq!(result.unauthorized_fields(), ["a.c"]);
    }

    #[test]
    fn test_empty_array_counts_as_nested() {
        let schema = Schema::new().nested(
            "field_4",
            Schema::new().nested("field_5", Schema::new().required("field_6")),
        );
        let result = run(&schema, json!({ "field_4": { "field_5": [] } }));
        assert_eq!(
            result.missing_fields()["field_4.field_5.field_6"],
            MissingReason::Required
        );
    }

    #[test]
    fn test_array_entries_keyed_by_index() {
        let schema = Schema::new().nested("list", Schema::new().required("0"));
        let result = run(&schema, json!({ "list": ["first", "second"] }));
        assert!(result.missing_fields().is_empty());
        assert_eq!(result.unauthorized_fields(), ["list.1"]);
    }

    #[test]
    fn test_orders_follow_schema_and_payload() {
        let schema = Schema::new().required("x").required("y").required("z");
        let result = run(&schema, json!({ "q": 1, "p": 2 }));

        let missing: Vec<_> = result.missing_fields().keys().cloned().collect();
        assert_eq!(missing, vec!["x", "y", "z"]);
        assert_eq!(result.unauthorized_fields(), ["q", "p"]);
    }

    #[test]
    fn test_trees() {
        let schema = Schema::new().required("a");
        let result = run(&schema, json!({ "b": 1 }));
        assert_eq!(Value::Object(result.missing_fields_tree()), json!({ "a": "required" }));
        assert_eq!(result.unauthorized_fields_tree(), json!(["b"]));
    }

    #[test]
    fn test_combine_appends() {
        let mut left = ValidationResult::new();
        left.push_unauthorized(&FieldPath::parse("a"));
        let mut right = ValidationResult::new();
        right.push_unauthorized(&FieldPath::parse("b"));
        right.push_missing(&FieldPath::parse("c"), MissingReason::Required);

        let combined = left.combine(right);
        assert_eq!(combined.unauthorized_fields(), ["a", "b"]);
        assert_eq!(combined.missing_fields().len(), 1);
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(MissingReason::Required.to_string(), "required");
        assert_eq!(
            MissingReason::TypeMismatch.as_str(),
            "required field type not matching array"
        );
    }
}
