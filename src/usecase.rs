//! Running use cases against a request and a presenter.
//!
//! A [`UseCase`] receives an [`Execution`]: the optional validated
//! [`Request`] it should act on, and a handle to present its single
//! [`Response`]. Failures are returned as [`DomainError`]s for the caller's
//! boundary to format.
//!
//! # Example
//!
//! ```rust
//! use usecase_core::{
//!     usecase, DomainError, Execution, Presenter, Request, Response, ResponsePresenter, Schema,
//!     StatusCode,
//! };
//! use serde_json::json;
//!
//! let schema = Schema::new().required("name");
//! let request = Request::create(&schema, json!({ "name": "Ada" })).unwrap();
//! let presenter = ResponsePresenter::new();
//!
//! let greet = |execution: &Execution<'_>| -> Result<(), DomainError> {
//!     let name = execution.request_data()["name"].clone();
//!     execution.present(
//!         Response::builder()
//!             .status_code(StatusCode::Ok)
//!             .entry("greeting", name)
//!             .build(),
//!     );
//!     Ok(())
//! };
//!
//! usecase::execute(&greet, Some(&request), &presenter).unwrap();
//! assert_eq!(presenter.response().unwrap().get("greeting"), Some(&json!("Ada")));
//! ```

use serde_json::{Map, Value};
use tracing::{info_span, trace, warn};

use crate::error::DomainError;
use crate::presenter::Presenter;
use crate::request::Request;
use crate::response::Response;

/// One unit of application logic.
///
/// Any `Fn(&Execution<'_>) -> Result<(), DomainError>` is a use case.
pub trait UseCase {
    fn execute(&self, execution: &Execution<'_>) -> Result<(), DomainError>;
}

impl<F> UseCase for F
where
    F: Fn(&Execution<'_>) -> Result<(), DomainError>,
{
    fn execute(&self, execution: &Execution<'_>) -> Result<(), DomainError> {
        self(execution)
    }
}

/// What a use case sees while it runs.
pub struct Execution<'a> {
    request: Option<&'a Request>,
    presenter: &'a dyn Presenter,
}

impl<'a> Execution<'a> {
    pub fn new(request: Option<&'a Request>, presenter: &'a dyn Presenter) -> Self {
        Self { request, presenter }
    }

    pub fn request(&self) -> Option<&'a Request> {
        self.request
    }

    /// The request payload, or an empty tree when there is no request.
    pub fn request_data(&self) -> Map<String, Value> {
        self.request
            .map(|request| request.to_tree().clone())
            .unwrap_or_default()
    }

    /// Hands the response to the presenter.
    pub fn present(&self, response: Response) {
        self.presenter.present(response);
    }
}

/// Runs `use_case` once.
///
/// The execution is wrapped in a `usecase` span carrying the request id. A
/// failure is logged at warn level with [`DomainError::errors_for_log`] and
/// returned unchanged.
pub fn execute<U>(
    use_case: &U,
    request: Option<&Request>,
    presenter: &dyn Presenter,
) -> Result<(), DomainError>
where
    U: UseCase + ?Sized,
{
    let span = info_span!("usecase", request_id = request.map(Request::id));
    let _enter = span.enter();

    let execution = Execution::new(request, presenter);
    match use_case.execute(&execution) {
        Ok(()) => {
            trace!("use case completed");
            Ok(())
        }
        Err(error) => {
            warn!(errors = %error.errors_for_log(), "use case failed");
            Err(error)
        }
    }
}
