//! The structured domain error.

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::panic::Location;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::status::{Status, StatusCode};

/// Message tags naming the failure classes raised by this crate.
///
/// Callers are free to raise their own tags; these are the ones the request
/// layer produces.
pub mod tags {
    /// A payload lacks required fields.
    pub const MISSING_REQUIRED_FIELDS: &str = "missing.required.fields";
    /// A payload carries fields its schema does not declare.
    pub const ILLEGAL_FIELDS: &str = "illegal.fields";
    /// A payload failed a constraint check or could not be read.
    pub const INVALID_REQUEST_FIELDS: &str = "invalid.request.fields";
}

/// Key under `details` holding missing fields.
const MISSING_FIELDS_KEY: &str = "missing_fields";
/// Key under `details` holding unauthorized fields.
const UNAUTHORIZED_FIELDS_KEY: &str = "unauthorized_fields";
/// Key under `details` holding a single human-readable failure message.
const ERROR_KEY: &str = "error";

/// A structured error carrying a status code, a message tag and a details
/// tree.
///
/// A `DomainError` is raised wherever a use-case pipeline fails and travels
/// with `?` up to a boundary, which renders it with [`format`](Self::format)
/// for callers and [`errors_for_log`](Self::errors_for_log) for diagnostics.
/// The status code defaults to [`StatusCode::BadRequest`].
///
/// The constructing call site is recorded so log records can point back at
/// where the error was raised.
///
/// # Example
///
/// ```rust
/// use usecase_core::{DomainError, StatusCode};
/// use serde_json::json;
///
/// let error = DomainError::new("user.not.found")
///     .with_code(StatusCode::NotFound)
///     .with_detail("user_id", 42);
///
/// assert_eq!(
///     error.format(),
///     json!({
///         "status": "error",
///         "error_code": 404,
///         "message": "user.not.found",
///         "user_id": 42
///     })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DomainError {
    code: StatusCode,
    message: String,
    details: Map<String, Value>,
    location: &'static Location<'static>,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl DomainError {
    /// Creates a bad-request error with no details.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::BadRequest,
            message: message.into(),
            details: Map::new(),
            location: Location::caller(),
            source: None,
        }
    }

    /// Creates an error from an errors tree.
    ///
    /// `message` becomes the message. A `details` object becomes the details;
    /// without one, every other top-level entry is taken as a detail.
    #[track_caller]
    pub fn from_errors(errors: &Map<String, Value>) -> Self {
        let message = errors
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let details = match errors.get("details") {
            Some(Value::Object(details)) => details.clone(),
            _ => errors
                .iter()
                .filter(|(key, _)| key.as_str() != "message")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        };

        Self::new(message).with_details(details)
    }

    /// Reports missing fields, keyed by dotted path.
    #[track_caller]
    pub fn missing_required_fields(missing_fields: Map<String, Value>) -> Self {
        Self::new(tags::MISSING_REQUIRED_FIELDS)
            .with_detail(MISSING_FIELDS_KEY, Value::Object(missing_fields))
    }

    /// Reports fields the schema does not declare.
    #[track_caller]
    pub fn illegal_fields<I, S>(unauthorized_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<Value> = unauthorized_fields
            .into_iter()
            .map(|field| Value::String(field.into()))
            .collect();
        Self::new(tags::ILLEGAL_FIELDS).with_detail(UNAUTHORIZED_FIELDS_KEY, Value::Array(fields))
    }

    /// Reports a payload that failed a constraint check.
    #[track_caller]
    pub fn invalid_request_fields(error: impl Into<String>) -> Self {
        Self::new(tags::INVALID_REQUEST_FIELDS).with_detail(ERROR_KEY, Value::String(error.into()))
    }

    /// Sets the status code.
    pub fn with_code(mut self, code: StatusCode) -> Self {
        self.code = code;
        self
    }

    /// Replaces the details tree.
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = details;
        self
    }

    /// Sets a single entry of the details tree.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Records the error this one was raised from.
    pub fn with_source(mut self, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        self.source = Some(Arc::from(source.into()));
        self
    }

    /// The message tag.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// The details tree, empty when none was given.
    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }

    /// Returns `details.error` when it is a string, otherwise an empty string.
    pub fn details_message(&self) -> &str {
        self.details
            .get(ERROR_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns true if this error carries the given message tag.
    pub fn is(&self, tag: &str) -> bool {
        self.message == tag
    }

    /// Where the error was constructed.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Renders the caller-visible error shape.
    ///
    /// `status`, `error_code` and `message` come first; each details entry
    /// follows unless its key is already taken, so details can never overwrite
    /// the message.
    pub fn format(&self) -> Value {
        let mut out = Map::new();
        out.insert("status".to_string(), Value::from(Status::Error.as_str()));
        out.insert("error_code".to_string(), Value::from(self.code.as_u16()));
        out.insert("message".to_string(), Value::from(self.message.clone()));

        for (key, value) in &self.details {
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }

        Value::Object(out)
    }

    /// Returns the message and details as one tree.
    pub fn errors(&self) -> Value {
        json!({
            "message": self.message,
            "details": self.details,
        })
    }

    /// Bundles the error with origin metadata for log records.
    pub fn errors_for_log(&self) -> Value {
        json!({
            "errors": self.errors(),
            "code": self.code.as_u16(),
            "file": self.location.file(),
            "line": self.location.line(),
            "column": self.location.column(),
            "previous": self.source.as_ref().map(|source| source.to_string()),
        })
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

impl Serialize for DomainError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.format().serialize(serializer)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DomainError>();
    assert_sync::<DomainError>();
};
