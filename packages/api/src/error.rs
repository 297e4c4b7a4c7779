use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::services::errors::user_service_errors::UserServiceError;
use shared::validation::ValidationErrors;

use crate::content::{ContentFormat, Formatted};

pub const VALIDATION_ERRORS_ROOT: &str = "ValidationErrors";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request")]
    MalformedRequest,
    #[error("unsupported media type")]
    UnsupportedMediaType,
    #[error("not found")]
    NotFound,
    #[error("validation failed: {errors:?}")]
    Validation {
        errors: ValidationErrors,
        format: ContentFormat,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a service failure onto HTTP, rendering validation errors in `format`.
    pub fn from_service(error: UserServiceError, format: ContentFormat) -> Self {
        match error {
            UserServiceError::MalformedRequest(_) => ApiError::MalformedRequest,
            UserServiceError::UserNotFound => ApiError::NotFound,
            UserServiceError::ValidationError(errors) => ApiError::Validation { errors, format },
            UserServiceError::RepositoryError(msg) => ApiError::Internal(msg),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation { errors, format } => (
                status,
                Formatted::new(format, VALIDATION_ERRORS_ROOT, errors),
            )
                .into_response(),
            _ => status.into_response(),
        }
    }
}
