use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::core::CoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Core(err) => match &err {
                CoreError::Unauthenticated => (StatusCode::UNAUTHORIZED, err.to_string()),
                CoreError::InvalidFilterCombination { .. }
                | CoreError::UnknownQueryField(_)
                | CoreError::UnknownOperator(_)
                | CoreError::InvalidFilterValue(_)
                | CoreError::TypeMismatch(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                CoreError::Store(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store operation failed".to_string(),
                ),
            },
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
