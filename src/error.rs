use thiserror::Error;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A validation error (semantically invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A storage-level constraint violation (unique email, missing
    /// required column). Carries the driver's diagnostic message.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Wire body returned for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExceptionResponse {
    pub timestamp: String,
    pub status: u16,
    pub message: String,
}

impl ExceptionResponse {
    /// Builds the body for a given status. The embedded `status` field is
    /// always the code actually sent on the status line.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Convert custom Error to HTTP response
///
/// Maps each error variant to an HTTP status code and returns the
/// structured `ExceptionResponse` body.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Constraint(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Sqlx(_) | Error::Internal(_) | Error::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self {
            Error::Validation(msg) | Error::NotFound(msg) | Error::Constraint(msg) => msg,
            Error::Sqlx(ref e) => {
                tracing::error!(error = %e, "database error");
                "Database error".to_string()
            }
            Error::Internal(ref msg) => {
                tracing::error!(error = %msg, "internal error");
                msg.clone()
            }
            Error::Config(_) => "Configuration error".to_string(),
        };

        (status, Json(ExceptionResponse::new(status, message))).into_response()
    }
}
