//! Field specifications.

use super::Schema;

/// What a schema declares about a single field.
///
/// A field is either a leaf carrying a required marker, or a node whose value
/// must itself be nested and is validated against a child [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// A leaf field. `true` means required, `false` means optional but declared.
    Leaf(bool),
    /// A nested field validated recursively.
    Node(Schema),
}

impl FieldSpec {
    /// Returns true if the field must be present in a payload.
    ///
    /// A node is required only when its schema declares at least one field;
    /// an empty nested schema behaves like an optional field.
    pub fn is_required(&self) -> bool {
        match self {
            FieldSpec::Leaf(required) => *required,
            FieldSpec::Node(schema) => !schema.is_empty(),
        }
    }

    /// Returns the child schema for a node, or None for a leaf.
    pub fn as_node(&self) -> Option<&Schema> {
        match self {
            FieldSpec::Node(schema) => Some(schema),
            FieldSpec::Leaf(_) => None,
        }
    }
}

impl From<bool> for FieldSpec {
    fn from(required: bool) -> Self {
        FieldSpec::Leaf(required)
    }
}

impl From<Schema> for FieldSpec {
    fn from(schema: Schema) -> Self {
        FieldSpec::Node(schema)
    }
}
