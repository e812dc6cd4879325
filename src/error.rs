use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Invalid teacher credentials")]
    Unauthorized,
    #[error("Announcement not found")]
    NotFound,
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "Store error");
                "Internal server error".to_string()
            }
            other => {
                tracing::debug!(status = %status, message = %other, "Request rejected");
                other.to_string()
            }
        };

        // `detail` mirrors `error` for clients that read the older response shape.
        (status, Json(json!({ "error": message, "detail": message }))).into_response()
    }
}
