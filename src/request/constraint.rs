//! Constraint hooks run on payloads that passed schema validation.
//!
//! A hook is any `Fn(&Map<String, Value>) -> Result<(), ConstraintError>`. The
//! [`Assert`] helper covers the usual field checks and converts into a
//! [`ConstraintError`] with `?`:
//!
//! ```rust
//! use usecase_core::request::constraint::Assert;
//! use usecase_core::{RequestContract, Schema};
//! use serde_json::json;
//!
//! let contract = RequestContract::new(Schema::new().required("name")).with_constraints(|payload| {
//!     Assert::that(payload.get("name"), "[name] must be a non-empty string.")
//!         .not_empty()?
//!         .string()?;
//!     Ok(())
//! });
//!
//! let error = contract.create(json!({ "name": "" })).unwrap_err();
//! assert_eq!(error.details_message(), "[name] must be a non-empty string.");
//! ```

use regex::Regex;
use serde_json::{Map, Value};

/// The error a constraint hook may return. Any error type converts into it.
pub type ConstraintError = Box<dyn std::error::Error + Send + Sync>;

/// The constraint hook signature.
pub type ConstraintHook = dyn Fn(&Map<String, Value>) -> Result<(), ConstraintError> + Send + Sync;

/// A failed [`Assert`] check; displays the assertion's message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    message: String,
}

impl ConstraintViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fluent checks over a single payload value.
///
/// Every check returns the assertion back on success so checks chain with `?`;
/// the first failing check yields a [`ConstraintViolation`] carrying the
/// message given to [`Assert::that`]. An absent value fails every check.
#[derive(Debug, Clone)]
pub struct Assert<'a> {
    value: Option<&'a Value>,
    message: String,
}

impl<'a> Assert<'a> {
    pub fn that(value: Option<&'a Value>, message: impl Into<String>) -> Self {
        Self {
            value,
            message: message.into(),
        }
    }

    /// Fails on an absent value, `null`, `false`, zero, and empty strings,
    /// arrays or objects.
    pub fn not_empty(self) -> Result<Self, ConstraintViolation> {
        let empty = match self.value {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => !b,
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(obj)) => obj.is_empty(),
        };
        self.check(!empty)
    }

    pub fn string(self) -> Result<Self, ConstraintViolation> {
        let ok = matches!(self.value, Some(Value::String(_)));
        self.check(ok)
    }

    pub fn integer(self) -> Result<Self, ConstraintViolation> {
        let ok = matches!(self.value, Some(Value::Number(n)) if n.is_i64() || n.is_u64());
        self.check(ok)
    }

    pub fn boolean(self) -> Result<Self, ConstraintViolation> {
        let ok = matches!(self.value, Some(Value::Bool(_)));
        self.check(ok)
    }

    /// Requires a string whose length in characters lies in `min..=max`.
    pub fn length_between(self, min: usize, max: usize) -> Result<Self, ConstraintViolation> {
        let ok = self
            .value
            .and_then(Value::as_str)
            .map(|s| (min..=max).contains(&s.chars().count()))
            .unwrap_or(false);
        self.check(ok)
    }

    /// Requires a string matching `pattern`.
    pub fn matches(self, pattern: &Regex) -> Result<Self, ConstraintViolation> {
        let ok = self
            .value
            .and_then(Value::as_str)
            .map(|s| pattern.is_match(s))
            .unwrap_or(false);
        self.check(ok)
    }

    fn check(self, ok: bool) -> Result<Self, ConstraintViolation> {
        if ok {
            Ok(self)
        } else {
            Err(ConstraintViolation::new(self.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_empty() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(Assert::that(Some(&value), "empty").not_empty().is_err(), "{value}");
        }
        for value in [json!(true), json!(1), json!("x"), json!([0]), json!({ "a": null })] {
            assert!(Assert::that(Some(&value), "set").not_empty().is_ok(), "{value}");
        }
        assert!(Assert::that(None, "absent").not_empty().is_err());
    }

    #[test]
    fn test_type_checks() {
        let text = json!("text");
        let number = json!(3);
        let float = json!(3.5);
        let flag = json!(true);

        assert!(Assert::that(Some(&text), "").string().is_ok());
        assert!(Assert::that(Some(&number), "").string().is_err());
        assert!(Assert::that(Some(&number), "").integer().is_ok());
        assert!(Assert::that(Some(&float), "").integer().is_err());
        assert!(Assert::that(Some(&flag), "").boolean().is_ok());
        assert!(Assert::that(Some(&text), "").boolean().is_err());
    }

    #[test]
    fn test_length_between_counts_chars() {
        let value = json!("héllo");
        assert!(Assert::that(Some(&value), "").length_between(5, 5).is_ok());
        assert!(Assert::that(Some(&value), "").length_between(6, 10).is_err());
    }

    #[test]
    fn test_matches() {
        let pattern = Regex::new(r"^\d{4}$").unwrap();
        let good = json!("2024");
        let bad = json!("24");
        assert!(Assert::that(Some(&good), "").matches(&pattern).is_ok());
        assert!(Assert::that(Some(&bad), "").matches(&pattern).is_err());
    }

    #[test]
    fn test_first_failure_carries_message() {
        let value = json!("");
        let err = Assert::that(Some(&value), "[field_1] field must not be an empty string.")
            .string()
            .and_then(Assert::not_empty)
            .unwrap_err();
        assert_eq!(err.to_string(), "[field_1] field must not be an empty string.");
        assert_eq!(err.message(), "[field_1] field must not be an empty string.");
    }
}
