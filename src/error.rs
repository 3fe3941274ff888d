use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::StatusResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not Found")]
    NotFound,

    #[error("Database error")]
    Db(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 400 with an empty body; failed lookups and malformed input respond
    /// this way unless the endpoint specifies a status message.
    pub fn bad_request() -> Self {
        Self::BadRequest(String::new())
    }

    pub fn forbidden(status: impl Into<String>) -> Self {
        Self::Forbidden(status.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            AppError::Forbidden(status) => {
                (StatusCode::FORBIDDEN, axum::Json(StatusResponse { status })).into_response()
            }
            AppError::BadRequest(status) if status.is_empty() => {
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::BadRequest(status) => {
                (StatusCode::BAD_REQUEST, axum::Json(StatusResponse { status })).into_response()
            }
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            // Store-level failures stay internal; the client only sees a 400.
            AppError::Db(err) => {
                tracing::warn!(error = %err, "database error");
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
