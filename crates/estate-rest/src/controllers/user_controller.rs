//! User management controller.

use super::parse_id;
use crate::{
    extractors::ApiJson,
    responses::{created, found, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use estate_core::UserId;
use estate_service::{CreateUserRequest, UpdateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user).put(update_user))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/username/:username", get(get_user_by_username))
}

async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    ok(state.user_service.list_users().await?)
}

async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    debug!("Create user request: {}", request.username);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// Get a user by ID.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id: UserId = parse_id(&id, "user")?;
    found(state.user_service.get_user(user_id).await?, "User", user_id)
}

async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user by username request: {}", username);

    let user = state.user_service.get_user_by_username(&username).await?;
    found(user, "User", username)
}

/// Overwrite a user. The id travels in the body.
async fn update_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", request.id);

    ok(state.user_service.update_user(request).await?)
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id: UserId = parse_id(&id, "user")?;
    state.user_service.delete_user(user_id).await?;

    Ok(no_content())
}
