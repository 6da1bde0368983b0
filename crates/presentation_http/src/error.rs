//! API error handling
//!
//! Every failure is rendered as `{"detail": "<message>"}` with a status code
//! derived from the application error that caused it.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Weather provider failure forwarded with the provider's status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub detail: String,
}

impl ApiError {
    /// HTTP status for this error
    ///
    /// Upstream codes outside the 4xx/5xx range become 502.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let message = err.to_string();
        match err {
            ApplicationError::Domain(_) => Self::BadRequest(message),
            ApplicationError::NotFound(_) => Self::NotFound(message),
            ApplicationError::Upstream { status, .. } => Self::Upstream { status, message },
            ApplicationError::ExternalService(_) => Self::BadGateway(message),
            ApplicationError::Store(_)
            | ApplicationError::Log(_)
            | ApplicationError::Configuration(_)
            | ApplicationError::Internal(_) => Self::Internal(message),
        }
    }
}
