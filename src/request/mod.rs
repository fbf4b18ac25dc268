//! Validated application requests.
//!
//! A [`RequestContract`] pairs a [`Schema`] with an optional constraint hook
//! and an id source. [`RequestContract::create`] is the only way to obtain a
//! [`Request`]: the payload must pass the schema (unauthorized fields are
//! checked before missing ones) and then the hook, or a single
//! [`DomainError`] describing the first failing class is returned.
//!
//! # Example
//!
//! ```rust
//! use usecase_core::{error::tags, Request, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .required("name")
//!     .nested("address", Schema::new().required("city").optional("zip"));
//!
//! let request = Request::create(&schema, json!({
//!     "name": "Ada",
//!     "address": { "city": "London" }
//! }))
//! .unwrap();
//! assert_eq!(request.get("address.city"), Some(&json!("London")));
//!
//! let error = Request::create(&schema, json!({ "name": "Ada", "age": 36 })).unwrap_err();
//! assert!(error.is(tags::ILLEGAL_FIELDS));
//! assert_eq!(error.details()["unauthorized_fields"], json!(["age"]));
//! ```

pub mod constraint;
mod id;

pub use id::{IdSource, UuidV4};

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::accessor::PathAccessor;
use crate::error::{tags, DomainError};
use crate::schema::{value_type_name, Schema};
use crate::validation::{SchemaValidator, ValidationResult};

use constraint::{ConstraintError, ConstraintHook};

/// An accepted payload together with its generated identifier.
///
/// A `Request` is read-only. Fields are reached by dotted path with
/// [`get`](Self::get); a typed view is obtained with
/// [`deserialize`](Self::deserialize).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    id: String,
    payload: Map<String, Value>,
    accessor: PathAccessor,
}

impl Request {
    /// Validates `payload` against `schema` and wraps it with a UUID v4 id.
    ///
    /// This is [`RequestContract::create`] with no constraint hook.
    pub fn create(schema: &Schema, payload: Value) -> Result<Self, DomainError> {
        RequestContract::new(schema.clone()).create(payload)
    }

    /// The generated request identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolves a dotted path inside the payload.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.accessor.get_in(&self.payload, path)
    }

    /// Resolves a dotted path inside the payload, falling back to `default`.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// The full accepted payload.
    pub fn to_tree(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn into_tree(self) -> Map<String, Value> {
        self.payload
    }

    /// Reads the payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an `invalid.request.fields` error carrying the deserializer's
    /// message when the payload does not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_value(Value::Object(self.payload.clone()))
            .map_err(|e| DomainError::invalid_request_fields(e.to_string()).with_source(e))
    }
}

/// Everything needed to turn raw payloads into [`Request`]s.
///
/// The contract owns its schema, a [`SchemaValidator`], the accessor handed
/// to every request, an [`IdSource`] and an optional constraint hook. It is
/// cheap to clone and can be shared across threads.
#[derive(Clone)]
pub struct RequestContract {
    schema: Schema,
    validator: SchemaValidator,
    accessor: PathAccessor,
    id_source: Arc<dyn IdSource>,
    constraints: Option<Arc<ConstraintHook>>,
}

impl RequestContract {
    /// Creates a contract with UUID v4 ids and no constraint hook.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            validator: SchemaValidator::new(),
            accessor: PathAccessor::new(),
            id_source: Arc::new(UuidV4),
            constraints: None,
        }
    }

    /// Sets the hook run on payloads that passed the schema.
    ///
    /// Whatever error the hook returns is re-raised as an
    /// `invalid.request.fields` [`DomainError`] whose `details.error` holds the
    /// hook's message. Details of a hook-raised `DomainError` are kept.
    pub fn with_constraints<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<(), ConstraintError> + Send + Sync + 'static,
    {
        self.constraints = Some(Arc::new(hook));
        self
    }

    /// Sets the source of request identifiers.
    pub fn with_id_source(mut self, id_source: impl IdSource + 'static) -> Self {
        self.id_source = Arc::new(id_source);
        self
    }

    /// Sets the accessor handed to every request, e.g. for another separator.
    pub fn with_accessor(mut self, accessor: PathAccessor) -> Self {
        self.accessor = accessor;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Runs the schema alone, without raising.
    pub fn check(&self, payload: &Map<String, Value>) -> ValidationResult {
        self.validator.validate(&self.schema, payload)
    }

    /// Validates a payload and builds a request from it.
    ///
    /// # Errors
    ///
    /// - `invalid.request.fields` when the payload root is not an object;
    /// - `illegal.fields` with `details.unauthorized_fields` when the payload
    ///   carries undeclared fields;
    /// - `missing.required.fields` with `details.missing_fields` when required
    ///   fields are absent or nested fields are not nested;
    /// - `invalid.request.fields` with `details.error` when the constraint
    ///   hook fails.
    pub fn create(&self, payload: Value) -> Result<Request, DomainError> {
        match payload {
            Value::Object(payload) => self.create_from_map(payload),
            other => {
                debug!(got = value_type_name(&other), "rejecting non-object request payload");
                Err(DomainError::invalid_request_fields(format!(
                    "request payload must be an object, got {}",
                    value_type_name(&other)
                )))
            }
        }
    }

    /// Same as [`create`](Self::create) for a payload that is already a map.
    pub fn create_from_map(&self, payload: Map<String, Value>) -> Result<Request, DomainError> {
        reject_invalid(&self.check(&payload))?;

        if let Some(hook) = &self.constraints {
            hook(&payload).map_err(wrap_constraint_error)?;
        }

        let request = Request {
            id: self.id_source.new_id(),
            payload,
            accessor: self.accessor,
        };
        trace!(request_id = %request.id, "request accepted");
        Ok(request)
    }
}

impl fmt::Debug for RequestContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContract")
            .field("schema", &self.schema)
            .field("accessor", &self.accessor)
            .field("constraints", &self.constraints.is_some())
            .finish_non_exhaustive()
    }
}

/// Raises the first failing class of a validation result.
fn reject_invalid(result: &ValidationResult) -> Result<(), DomainError> {
    if !result.unauthorized_fields().is_empty() {
        debug!(
            unauthorized_fields = ?result.unauthorized_fields(),
            "rejecting request with illegal fields"
        );
        return Err(DomainError::illegal_fields(
            result.unauthorized_fields().iter().cloned(),
        ));
    }

    if !result.missing_fields().is_empty() {
        debug!(
            missing_fields = ?result.missing_fields().keys().collect::<Vec<_>>(),
            "rejecting request with missing fields"
        );
        return Err(DomainError::missing_required_fields(
            result.missing_fields_tree(),
        ));
    }

    Ok(())
}

fn wrap_constraint_error(error: ConstraintError) -> DomainError {
    debug!(error = %error, "request constraints failed");
    match error.downcast::<DomainError>() {
        Ok(domain) => {
            let mut details = domain.details().clone();
            details.insert("error".to_string(), Value::from(domain.message()));
            DomainError::new(tags::INVALID_REQUEST_FIELDS)
                .with_details(details)
                .with_source(*domain)
        }
        Err(other) => DomainError::invalid_request_fields(other.to_string()).with_source(other),
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Request>();
    assert_sync::<Request>();
    assert_send::<RequestContract>();
    assert_sync::<RequestContract>();
};
