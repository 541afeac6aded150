//! Error types for the user directory service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use user_directory_common::ApiResponse;

use crate::store::StoreError;

/// Failures surfaced at the request boundary.
///
/// Every variant is rendered as the uniform `{success: false, error}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidArgument(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Error::NotFound("User not found".to_string()),
            StoreError::EmailTaken(_) => Error::Conflict("Email already exists".to_string()),
            StoreError::Unavailable(reason) => Error::Internal(reason),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Error::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                "Internal server error".to_string()
            }
            other => {
                tracing::debug!(status = %status.as_u16(), "Request rejected: {}", other);
                other.to_string()
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
