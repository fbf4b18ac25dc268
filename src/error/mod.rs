//! Error types.
//!
//! [`DomainError`] is the single structured error raised across a use-case
//! pipeline; its [`tags`] name the failure class. [`SchemaDefinitionError`]
//! covers schemas that cannot be built in the first place.

mod domain_error;
mod schema_error;

pub use domain_error::{tags, DomainError};
pub use schema_error::SchemaDefinitionError;
