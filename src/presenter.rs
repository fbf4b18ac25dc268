//! Delivery of use-case responses.
//!
//! A use case hands its single [`Response`] to a [`Presenter`]; the boundary
//! that invoked the use case reads it back afterwards.

use parking_lot::RwLock;
use serde_json::Value;

use crate::response::Response;

/// Receives the response of a use-case execution.
///
/// Implementors must be shareable across threads. A presenter that is asked
/// to present more than once keeps the last response.
pub trait Presenter: Send + Sync {
    /// Stores the response of the execution.
    fn present(&self, response: Response);

    /// The last presented response, if any.
    fn response(&self) -> Option<Response>;

    /// The last presented response rendered with [`Response::output`].
    fn formatted_response(&self) -> Option<Value> {
        self.response().map(|response| response.output())
    }
}

/// A presenter holding the last presented response in memory.
///
/// # Example
///
/// ```rust
/// use usecase_core::{Presenter, Response, ResponsePresenter, StatusCode};
///
/// let presenter = ResponsePresenter::new();
/// assert!(presenter.response().is_none());
///
/// presenter.present(Response::builder().status_code(StatusCode::Created).build());
/// assert_eq!(presenter.response().unwrap().status_code(), StatusCode::Created);
/// ```
#[derive(Debug, Default)]
pub struct ResponsePresenter {
    slot: RwLock<Option<Response>>,
}

impl ResponsePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the stored response.
    pub fn take(&self) -> Option<Response> {
        self.slot.write().take()
    }
}

impl Presenter for ResponsePresenter {
    fn present(&self, response: Response) {
        *self.slot.write() = Some(response);
    }

    fn response(&self) -> Option<Response> {
        self.slot.read().clone()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ResponsePresenter>();
    assert_sync::<ResponsePresenter>();
};
