use axum::{
    extract::{Path, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use shared::models::user::patch::PatchDocument;
use shared::models::user::requests::{UserCreateDto, UserUpdateDto};
use shared::models::user::responses::UserDto;
use shared::services::user_service::UpsertOutcome;
use tracing::{debug, error};
use uuid::Uuid;

use crate::content::{ContentFormat, Formatted, JsonPayload, Payload};
use crate::{error::ApiError, state::AppState};

pub const USERS_ROUTE: &str = "/api/users";
const USER_ROOT: &str = "UserDto";
const ID_ROOT: &str = "Guid";

pub fn routes() -> Router<AppState> {
    Router::new().route(USERS_ROUTE, post(create_user)).route(
        "/api/users/{user_id}",
        get(get_user_by_id)
            .put(update_user)
            .patch(partially_update_user)
            .delete(delete_user),
    )
}

/// Canonical location of a user. Get-by-id and update-by-id share this path.
///
/// The value is a path relative to the serving host with no scheme or authority. RFC 7231
/// §7.1.2 allows a relative reference in `Location`. Clients resolve it against the request URI.
pub fn user_location(user_id: Uuid) -> String {
    format!("{}/{}", USERS_ROUTE, user_id)
}

fn created(format: ContentFormat, user_id: Uuid) -> Response {
    (
        StatusCode::CREATED,
        [(LOCATION, user_location(user_id))],
        Formatted::new(format, ID_ROOT, user_id),
    )
        .into_response()
}

/// Serves both GET and HEAD.
#[tracing::instrument(skip(state))]
async fn get_user_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    format: ContentFormat,
) -> Result<Formatted<UserDto>, ApiError> {
    state
        .user_service
        .get_user_by_id(user_id)
        .await
        .map(|user| Formatted::new(format, USER_ROOT, user))
        .map_err(|e| {
            error!("Failed to retrieve user {}: {}", user_id, e);
            ApiError::from_service(e, format)
        })
}

#[tracing::instrument(skip(state, request))]
async fn create_user(
    State(state): State<AppState>,
    format: ContentFormat,
    Payload(request): Payload<UserCreateDto>,
) -> Result<Response, ApiError> {
    let login = request
        .as_ref()
        .and_then(|r| r.login.clone())
        .unwrap_or_default();
    let user_id = state
        .user_service
        .create_user(request)
        .await
        .map_err(|e| {
            error!("Failed to create user {}: {}", login, e);
            ApiError::from_service(e, format)
        })?;
    debug!("User created successfully: {} ({})", user_id, login);
    Ok(created(format, user_id))
}

#[tracing::instrument(skip(state, request))]
async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    format: ContentFormat,
    Payload(request): Payload<UserUpdateDto>,
) -> Result<Response, ApiError> {
    let outcome = state
        .user_service
        .upsert_user(user_id, request)
        .await
        .map_err(|e| {
            error!("Failed to update user {}: {}", user_id, e);
            ApiError::from_service(e, format)
        })?;
    match outcome {
        UpsertOutcome::Created(id) => {
            debug!("User created by update: {}", id);
            Ok(created(format, id))
        }
        UpsertOutcome::Replaced => {
            debug!("User updated successfully: {}", user_id);
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

#[tracing::instrument(skip(state, document))]
async fn partially_update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    format: ContentFormat,
    JsonPayload(document): JsonPayload<PatchDocument>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .patch_user(user_id, document)
        .await
        .map_err(|e| {
            error!("Failed to patch user {}: {}", user_id, e);
            ApiError::from_service(e, format)
        })?;
    debug!("User patched successfully: {}", user_id);
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete_user(user_id)
        .await
        .map_err(|e| {
            error!("Failed to delete user {}: {}", user_id, e);
            ApiError::from_service(e, ContentFormat::default())
        })?;
    debug!("User deleted successfully: {}", user_id);
    Ok(StatusCode::NO_CONTENT)
}
