//! Application error taxonomy and its HTTP mapping.
//!
//! Every route returns `Result<_, AppError>`. Client errors carry their message
//! through to the JSON body; internal errors are logged with the raw source and
//! answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::auth::AuthError;

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation, e.g. a mobile number already registered (400)
    #[error("{0}")]
    Conflict(String),

    /// Request body over the upload limit (413)
    #[error("{0}")]
    PayloadTooLarge(String),

    /// No row matched (404)
    #[error("{0}")]
    NotFound(String),

    /// Bad credentials, missing or invalid token (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Valid token without the required capability (403)
    #[error("{0}")]
    Forbidden(String),

    /// Database, storage or transport failure (500)
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AdminRequired(_) => Self::Forbidden(err.to_string()),
            AuthError::AuthenticationRequired
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::Internal(source) => {
                tracing::error!(error = ?source, "request failed");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
