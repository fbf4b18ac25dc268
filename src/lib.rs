//! # usecase-core
//!
//! A request/response contract layer for use-case driven applications.
//!
//! Every use case receives a payload that was checked against a declared
//! [`Schema`] and answers through one uniform [`Response`] envelope; failures
//! travel as a structured [`DomainError`].
//!
//! ## Overview
//!
//! Schemas are default-deny: a payload may only carry the fields its schema
//! declares, at every depth. Validation classifies every field at once and
//! reports all missing and all unauthorized fields together, keyed by dotted
//! path.
//!
//! ## Core Types
//!
//! - [`Schema`] and [`FieldSpec`]: the declared field tree
//! - [`SchemaValidator`] and [`ValidationResult`]: pure payload classification
//! - [`PathAccessor`]: dotted-path reads such as `user.address.city`
//! - [`RequestContract`] and [`Request`]: validated, identified payloads
//! - [`Response`]: the success or error envelope
//! - [`DomainError`]: the structured failure with code, tag and details
//! - [`UseCase`], [`Presenter`] and [`usecase::execute`]: the pipeline glue
//!
//! ## Example
//!
//! ```rust
//! use usecase_core::{Request, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new().required("a").optional("b");
//!
//! let error = Request::create(&schema, json!({ "b": 1 })).unwrap_err();
//! assert_eq!(
//!     error.format(),
//!     json!({
//!         "status": "error",
//!         "error_code": 400,
//!         "message": "missing.required.fields",
//!         "missing_fields": { "a": "required" }
//!     })
//! );
//! ```

pub mod accessor;
pub mod error;
pub mod path;
pub mod presenter;
pub mod request;
pub mod response;
pub mod schema;
pub mod status;
pub mod usecase;
pub mod validation;

pub use accessor::PathAccessor;
pub use error::{tags, DomainError, SchemaDefinitionError};
pub use path::FieldPath;
pub use presenter::{Presenter, ResponsePresenter};
pub use request::{IdSource, Request, RequestContract, UuidV4};
pub use response::{Response, ResponseBuilder};
pub use schema::{FieldSpec, Schema};
pub use status::{Status, StatusCode, UnknownStatusCode};
pub use usecase::{Execution, UseCase};
pub use validation::{validate, MissingReason, SchemaValidator, ValidationResult};
