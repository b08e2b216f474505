use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use tracing::warn;

use crate::repository::repository_error::RepositoryError;
use crate::util::response::ApiResponse;

/// Business-level failure. Every service returns this; it is turned into an
/// HTTP response in exactly one place (`From<ServiceError> for HandlerError`).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    /// Authentication failed or the caller does not own the resource.
    /// Role-gate refusals (403) never reach a service.
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InternalError(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ValidationError(msg) => ServiceError::InvalidInput(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg)
            | RepositoryError::ConnectionError(msg)
            | RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("Validation error: {}", errors))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    NotFound,
    Unauthorized,
    Forbidden,
    BadRequest,
}

impl HandlerErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        HandlerError { error: HandlerErrorKind::BadRequest, message: message.into() }
    }

    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        HandlerError { error: HandlerErrorKind::Unauthorized, message: message.into() }
    }

    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        HandlerError { error: HandlerErrorKind::Forbidden, message: message.into() }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

// Store and validation failures are not told apart on the wire: both are a
// 400 carrying the underlying message.
impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        let error = match &err {
            ServiceError::NotFound(_) => HandlerErrorKind::NotFound,
            ServiceError::Unauthorized(_) => HandlerErrorKind::Unauthorized,
            ServiceError::InvalidInput(_) | ServiceError::Conflict(_) | ServiceError::InternalError(_) => {
                HandlerErrorKind::BadRequest
            }
        };
        if let ServiceError::InternalError(msg) = &err {
            warn!("Store failure surfaced to client: {}", msg);
        }
        HandlerError { error, message: err.to_string() }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse::failure(self.message);
        (self.error.status(), Json(body)).into_response()
    }
}
