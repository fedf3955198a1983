use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) | AppError::Store(StoreError::NotFound(_)) => "NOT_FOUND",
            AppError::Store(StoreError::Conflict(_)) => "CONFLICT",
            AppError::Store(_) => "STORE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::Store(StoreError::Database(e)) => {
                error!(error = ?e, "Database error");
            }
            AppError::Store(StoreError::Unavailable(msg)) => {
                error!(message = %msg, "Store unavailable");
            }
            other => {
                warn!(error = ?other, "Request rejected");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level messages; database internals stay in the log
        let public_message = match &self {
            AppError::Validation(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Store(StoreError::NotFound(what)) => format!("{what} was not found"),
            AppError::Store(StoreError::Conflict(msg)) => msg.clone(),
            AppError::Store(_) => "A storage error occurred".to_string(),
        };

        error_response(code, public_message, status)
    }
}
