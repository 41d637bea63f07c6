use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use agora_store::StoreError;
use agora_types::ValidationError;

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("sample data rejected: {0}")]
    Seed(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Request-level failure, rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn user_not_found() -> Self {
        Self::NotFound("User not found".into())
    }

    pub fn post_not_found() -> Self {
        Self::NotFound("Post not found".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(_) => Self::user_not_found(),
            StoreError::PostNotFound(_) => Self::post_not_found(),
            StoreError::SelfFollowRejected(_) => Self::BadRequest("Cannot follow yourself".into()),
            StoreError::Validation(e) => Self::BadRequest(e.to_string()),
            StoreError::LockPoisoned => Self::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!(status = status.as_u16(), error = %other, "request rejected");
                other.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
