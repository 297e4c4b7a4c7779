use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{config::StorageBackend, state::AppState};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub storage: StorageBackend,
    pub version: String,
}

/// Liveness of the users API and the storage backend it was started with.
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        storage: state.storage,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared::repositories::in_memory_user_repository::InMemoryUserRepository;

    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_storage_backend() {
        let state = AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            StorageBackend::DynamoDb,
        );

        let Json(response) = health_check(State(state)).await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.storage, StorageBackend::DynamoDb);
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            storage: StorageBackend::Memory,
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"status":"healthy","storage":"memory","version":"0.1.0"}"#
        );
    }
}
