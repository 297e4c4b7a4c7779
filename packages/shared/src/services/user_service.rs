use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::models::user::patch::PatchDocument;
use crate::models::user::requests::{UserCreateDto, UserUpdateDto};
use crate::models::user::responses::UserDto;
use crate::models::user::UserEntity;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::validation::{Validate, ValidationErrors};

/// What a full update did to the stored user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(Uuid),
    Replaced,
}

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

fn repository_error(e: UserRepositoryError) -> UserServiceError {
    UserServiceError::RepositoryError(e.to_string())
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    async fn find_user(&self, user_id: Uuid) -> Result<UserEntity, UserServiceError> {
        self.repository
            .find_by_id(user_id)
            .await
            .map_err(repository_error)?
            .ok_or(UserServiceError::UserNotFound)
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<UserDto, UserServiceError> {
        let user = self.find_user(user_id).await?;
        Ok(UserDto::from(&user))
    }

    /// Validates and stores a new user, returning the id the repository assigned.
    pub async fn create_user(&self, request: Option<UserCreateDto>) -> Result<Uuid, UserServiceError> {
        let request = request
            .ok_or_else(|| UserServiceError::MalformedRequest("missing request body".to_string()))?;
        request.validate().into_result()?;

        let created = self
            .repository
            .insert(UserEntity::from(request))
            .await
            .map_err(repository_error)?;
        debug!("Created user {} ({})", created.id, created.login);
        Ok(created.id)
    }

    /// Replaces the user stored under `user_id`, creating it if it does not exist.
    /// The route id always wins over any id carried in the body.
    pub async fn upsert_user(
        &self,
        user_id: Uuid,
        request: Option<UserUpdateDto>,
    ) -> Result<UpsertOutcome, UserServiceError> {
        if user_id.is_nil() {
            return Err(UserServiceError::MalformedRequest(
                "user id cannot be empty".to_string(),
            ));
        }
        let mut request = request
            .ok_or_else(|| UserServiceError::MalformedRequest("missing request body".to_string()))?;
        request.validate().into_result()?;

        request.id = user_id;
        let user = UserEntity::from(request);
        let inserted = self
            .repository
            .update_or_insert(&user)
            .await
            .map_err(repository_error)?;

        if inserted {
            debug!("Inserted user {} via upsert", user.id);
            Ok(UpsertOutcome::Created(user.id))
        } else {
            debug!("Replaced user {}", user.id);
            Ok(UpsertOutcome::Replaced)
        }
    }

    /// Applies a patch document to the stored user. Nothing is written unless the patched
    /// shape passes validation.
    pub async fn patch_user(
        &self,
        user_id: Uuid,
        document: Option<PatchDocument>,
    ) -> Result<(), UserServiceError> {
        let document = document
            .ok_or_else(|| UserServiceError::MalformedRequest("missing patch document".to_string()))?;
        let mut user = self.find_user(user_id).await?;

        let mut patched = UserUpdateDto::from(&user);
        let mut errors = ValidationErrors::new();
        document.apply_to(&mut patched, &mut errors);
        errors.merge(patched.validate());
        errors.into_result()?;

        patched.apply_to(&mut user);
        self.repository
            .update(&user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => repository_error(e),
            })?;
        debug!("Patched user {}", user_id);
        Ok(())
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), UserServiceError> {
        self.find_user(user_id).await?;
        self.repository
            .delete(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => repository_error(e),
            })
    }
}
