//! Request identifier sources.

use uuid::Uuid;

/// Produces a fresh opaque identifier for every accepted request.
///
/// Any `Fn() -> String` closure is an id source, which keeps tests
/// deterministic:
///
/// ```rust
/// use usecase_core::{RequestContract, Schema};
/// use serde_json::json;
///
/// let contract = RequestContract::new(Schema::new()).with_id_source(|| "req-1".to_string());
/// let request = contract.create(json!({})).unwrap();
/// assert_eq!(request.id(), "req-1");
/// ```
pub trait IdSource: Send + Sync {
    fn new_id(&self) -> String;
}

/// The default source: random UUID v4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4;

impl IdSource for UuidV4 {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn new_id(&self) -> String {
        self()
    }
}
