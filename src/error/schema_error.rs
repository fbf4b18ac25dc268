//! Schema definition errors.

/// A JSON tree that cannot be read as a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDefinitionError {
    /// The schema root is not an object.
    #[error("schema root must be an object, got {got}")]
    NotAnObject { got: &'static str },

    /// A field spec is neither a required marker nor a nested schema.
    #[error("field '{path}' must be a boolean, null or an object, got {got}")]
    InvalidFieldSpec { path: String, got: &'static str },
}

// Definition errors cross thread boundaries alongside the schemas they describe.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaDefinitionError>();
    assert_sync::<SchemaDefinitionError>();
};
