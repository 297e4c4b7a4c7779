use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ValidationErrors> for UserServiceError {
    fn from(errors: ValidationErrors) -> Self {
        UserServiceError::ValidationError(errors)
    }
}
