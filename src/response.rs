//! The uniform use-case outcome.
//!
//! A [`Response`] is built once per use-case execution and never changes
//! afterwards. Its [`output`](Response::output) always carries `status`, `code`
//! and `message`, plus exactly one of `data` (success) or `details` (failure).

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::status::{Status, StatusCode};

/// An immutable success or error outcome.
///
/// # Example
///
/// ```rust
/// use usecase_core::{Response, StatusCode};
/// use serde_json::json;
///
/// let response = Response::builder()
///     .failure()
///     .status_code(StatusCode::NotFound)
///     .message("error.message")
///     .data(json!({ "k": "v" }).as_object().cloned().unwrap_or_default())
///     .build();
///
/// assert_eq!(
///     response.output(),
///     json!({
///         "status": "error",
///         "code": 404,
///         "message": "error.message",
///         "details": { "k": "v" }
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    success: bool,
    status_code: StatusCode,
    message: Option<String>,
    data: Map<String, Value>,
}

impl Response {
    /// Creates a response from all of its parts.
    pub fn create(
        success: bool,
        status_code: StatusCode,
        message: Option<String>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            success,
            status_code,
            message,
            data,
        }
    }

    /// Starts a builder with the default parts: success, no content, no
    /// message, empty data.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Looks up a top-level data entry. Keys are not split on dots.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Looks up a top-level data entry, falling back to `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// The outcome label, derived from the success flag alone.
    pub fn status(&self) -> Status {
        Status::from_success(self.success)
    }

    /// Renders the caller-visible envelope.
    pub fn output(&self) -> Value {
        let mut out = Map::new();
        out.insert("status".to_string(), Value::from(self.status().as_str()));
        out.insert("code".to_string(), Value::from(self.status_code.as_u16()));
        out.insert(
            "message".to_string(),
            self.message.clone().map(Value::String).unwrap_or(Value::Null),
        );

        let key = if self.success { "data" } else { "details" };
        out.insert(key.to_string(), Value::Object(self.data.clone()));

        Value::Object(out)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::create(true, StatusCode::NoContent, None, Map::new())
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.output().serialize(serializer)
    }
}

/// Builder for [`Response`].
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    inner: Response,
}

impl ResponseBuilder {
    /// Marks the outcome as a success. This is the default.
    pub fn success(mut self) -> Self {
        self.inner.success = true;
        self
    }

    /// Marks the outcome as a failure; data is rendered as `details`.
    pub fn failure(mut self) -> Self {
        self.inner.success = false;
        self
    }

    pub fn status_code(mut self, status_code: StatusCode) -> Self {
        self.inner.status_code = status_code;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.inner.message = Some(message.into());
        self
    }

    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.inner.data = data;
        self
    }

    /// Sets a single data entry.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inner.data.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Response {
        self.inner
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Response>();
    assert_sync::<Response>();
};
