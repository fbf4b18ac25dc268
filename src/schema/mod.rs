//! Declarative payload schemas.
//!
//! A [`Schema`] lists every field a payload may carry. Anything not declared is
//! unauthorized, at every depth. Each declared field is a [`FieldSpec`]: a leaf
//! with a required marker, or a nested schema.
//!
//! # Example
//!
//! ```rust
//! use usecase_core::Schema;
//! use serde_json::json;
//!
//! let built = Schema::new()
//!     .required("name")
//!     .optional("nickname")
//!     .nested("address", Schema::new().required("city"));
//!
//! let parsed = Schema::from_value(&json!({
//!     "name": true,
//!     "nickname": null,
//!     "address": { "city": true }
//! }))
//! .unwrap();
//!
//! assert_eq!(built, parsed);
//! ```

mod field;

pub use field::FieldSpec;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::SchemaDefinitionError;
use crate::path::FieldPath;

/// An ordered, default-deny description of the fields a payload may carry.
///
/// Field order is declaration order; it drives the order of missing-field
/// reports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    /// Creates a schema with no declared fields. It authorizes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required leaf field.
    pub fn required(self, name: impl Into<String>) -> Self {
        self.field(name, FieldSpec::Leaf(true))
    }

    /// Declares an optional leaf field.
    ///
    /// The field may be absent, but it still has to be declared for a payload
    /// to carry it.
    pub fn optional(self, name: impl Into<String>) -> Self {
        self.field(name, FieldSpec::Leaf(false))
    }

    /// Declares a nested field validated against `schema`.
    pub fn nested(self, name: impl Into<String>, schema: Schema) -> Self {
        self.field(name, FieldSpec::Node(schema))
    }

    /// Declares a field with an explicit spec. Redeclaring a name replaces the
    /// previous spec in place.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.fields.insert(name.into(), spec.into());
        self
    }

    /// Parses a schema from a JSON tree.
    ///
    /// `true` declares a required leaf, `false` or `null` an optional leaf, and
    /// an object a nested schema. Any other value is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDefinitionError::NotAnObject`] when the root is not an
    /// object and [`SchemaDefinitionError::InvalidFieldSpec`] for the first
    /// field whose spec has an unsupported type.
    pub fn from_value(value: &Value) -> Result<Self, SchemaDefinitionError> {
        match value {
            Value::Object(obj) => Self::parse_node(obj, &FieldPath::root()),
            other => Err(SchemaDefinitionError::NotAnObject {
                got: value_type_name(other),
            }),
        }
    }

    fn parse_node(obj: &Map<String, Value>, path: &FieldPath) -> Result<Self, SchemaDefinitionError> {
        let mut schema = Schema::new();
        for (name, spec) in obj {
            let field_path = path.push(name);
            let spec = match spec {
                Value::Bool(required) => FieldSpec::Leaf(*required),
                Value::Null => FieldSpec::Leaf(false),
                Value::Object(child) => FieldSpec::Node(Self::parse_node(child, &field_path)?),
                other => {
                    return Err(SchemaDefinitionError::InvalidFieldSpec {
                        path: field_path.to_string(),
                        got: value_type_name(other),
                    })
                }
            };
            schema.fields.insert(name.clone(), spec);
        }

        Ok(schema)
    }

    /// Returns the spec declared for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Returns true if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates declared fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders this schema back to its JSON form.
    pub fn to_value(&self) -> Value {
        let obj = self
            .fields
            .iter()
            .map(|(name, spec)| {
                let value = match spec {
                    FieldSpec::Leaf(required) => Value::Bool(*required),
                    FieldSpec::Node(schema) => schema.to_value(),
                };
                (name.clone(), value)
            })
            .collect();
        Value::Object(obj)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = SchemaDefinitionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Schema::from_value(value)
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
