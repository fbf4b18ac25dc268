//! Status vocabulary shared by responses and domain errors.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

/// The closed set of status codes a [`Response`](crate::Response) or a
/// [`DomainError`](crate::DomainError) may carry.
///
/// # Example
///
/// ```rust
/// use usecase_core::StatusCode;
///
/// assert_eq!(StatusCode::NotFound.as_u16(), 404);
/// assert_eq!(StatusCode::try_from(409).unwrap(), StatusCode::ResourceAlreadyExists);
/// assert!(StatusCode::try_from(418).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    Accepted = 202,
    #[default]
    NoContent = 204,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    ResourceAlreadyExists = 409,
    ExpectationFailed = 417,
    Locked = 423,
    TooManyRequests = 429,
    InternalServerError = 500,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
}

impl StatusCode {
    /// Every status code, in ascending numeric order.
    pub const ALL: [StatusCode; 15] = [
        StatusCode::Ok,
        StatusCode::Created,
        StatusCode::Accepted,
        StatusCode::NoContent,
        StatusCode::BadRequest,
        StatusCode::Unauthorized,
        StatusCode::Forbidden,
        StatusCode::NotFound,
        StatusCode::ResourceAlreadyExists,
        StatusCode::ExpectationFailed,
        StatusCode::Locked,
        StatusCode::TooManyRequests,
        StatusCode::InternalServerError,
        StatusCode::ServiceUnavailable,
        StatusCode::GatewayTimeout,
    ];

    /// Returns the numeric value of this code.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        StatusCode::ALL
            .into_iter()
            .find(|code| code.as_u16() == value)
            .ok_or(UnknownStatusCode(value))
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.as_u16()
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

/// A numeric code outside the [`StatusCode`] vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code {0}")]
pub struct UnknownStatusCode(pub u16);

/// The two-valued outcome label rendered as `status` in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    /// Picks the label for an outcome. The status code never takes part.
    pub fn from_success(success: bool) -> Self {
        if success {
            Status::Success
        } else {
            Status::Error
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
