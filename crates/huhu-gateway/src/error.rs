use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use huhu_core::{CoreError, StorageError};
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// Every way a request can fail, each mapped to exactly one status by [`AppError::status`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("request exceeded its deadline")]
    Timeout,
    #[error("handler panicked: {0}")]
    Panic(String),
    #[error("storage operation failed: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidJokeId(_) => AppError::InvalidInput("Invalid joke ID"),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Storage(StorageError::NotFound(_) | StorageError::Empty) => {
                StatusCode::NOT_FOUND
            }
            AppError::Storage(
                StorageError::Unavailable(_)
                | StorageError::Timeout(_)
                | StorageError::Query(_)
                | StorageError::InvalidData(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message returned to the client. Storage detail never leaks.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(message) | AppError::InvalidInput(message) => *message,
            AppError::Unauthorized => "Unauthorized",
            AppError::Timeout => "Request timed out",
            AppError::Panic(_) => "Internal server error",
            AppError::Storage(StorageError::NotFound(_)) => "Joke not found",
            AppError::Storage(StorageError::Empty) => "No jokes available",
            AppError::Storage(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
