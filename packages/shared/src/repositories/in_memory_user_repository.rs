use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::UserEntity;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;

/// Process-local store, used for local runs and tests.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserEntity>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn insert(&self, mut user: UserEntity) -> Result<UserEntity, UserRepositoryError> {
        let mut users = self.users.write().await;
        if user.id.is_nil() {
            user.id = Uuid::new_v4();
        }
        if users.contains_key(&user.id) {
            return Err(UserRepositoryError::AlreadyExists);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &UserEntity) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(UserRepositoryError::NotFound),
        }
    }

    async fn update_or_insert(&self, user: &UserEntity) -> Result<bool, UserRepositoryError> {
        let mut users = self.users.write().await;
        Ok(users.insert(user.id, user.clone()).is_none())
    }

    async fn delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        users
            .remove(&id)
            .map(|_| ())
            .ok_or(UserRepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(login: &str) -> UserEntity {
        UserEntity::new(login.to_string(), "Test".to_string(), "User".to_string())
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let repository = InMemoryUserRepository::new();

        let stored = repository.insert(new_user("alice")).await.unwrap();

        assert!(!stored.id.is_nil());
        assert_eq!(
            repository.find_by_id(stored.id).await.unwrap(),
            Some(stored)
        );
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_fails() {
        let repository = InMemoryUserRepository::new();
        let stored = repository.insert(new_user("alice")).await.unwrap();

        let result = repository.insert(stored.clone()).await;

        assert!(matches!(result, Err(UserRepositoryError::AlreadyExists)));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repository = InMemoryUserRepository::new();
        assert_eq!(repository.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let repository = InMemoryUserRepository::new();
        let user = UserEntity::with_id(
            Uuid::new_v4(),
            "ghost".to_string(),
            "G".to_string(),
            "H".to_string(),
        );

        let result = repository.update(&user).await;

        assert!(matches!(result, Err(UserRepositoryError::NotFound)));
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_or_insert_reports_insertion() {
        let repository = InMemoryUserRepository::new();
        let mut user = UserEntity::with_id(
            Uuid::new_v4(),
            "carol".to_string(),
            "Carol".to_string(),
            "White".to_string(),
        );

        assert!(repository.update_or_insert(&user).await.unwrap());

        user.login = "carol2".to_string();
        assert!(!repository.update_or_insert(&user).await.unwrap());
        assert_eq!(
            repository.find_by_id(user.id).await.unwrap().unwrap().login,
            "carol2"
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let repository = InMemoryUserRepository::new();
        let stored = repository.insert(new_user("dave")).await.unwrap();

        repository.delete(stored.id).await.unwrap();

        assert_eq!(repository.find_by_id(stored.id).await.unwrap(), None);
        assert!(matches!(
            repository.delete(stored.id).await,
            Err(UserRepositoryError::NotFound)
        ));
    }
}
