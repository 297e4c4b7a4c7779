use std::sync::Arc;

use shared::repositories::user_repository::UserRepository;
use shared::services::user_service::UserService;

use crate::config::StorageBackend;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    /// Backend the repository was built for, reported by `/health`.
    pub storage: StorageBackend,
}

impl AppState {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>, storage: StorageBackend) -> Self {
        AppState {
            user_service: Arc::new(UserService::new(repository)),
            storage,
        }
    }
}
