//! House management controller.

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
use estate_core::HouseId;
use estate_service::{CreateHouseRequest, HouseResponse, UpdateHouseRequest};
use tracing::debug;

/// Creates the house router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_houses).post(create_house).put(update_house))
        .route("/:id", get(get_house).delete(delete_house))
}

async fn list_houses(State(state): State<AppState>) -> ApiResult<Vec<HouseResponse>> {
    ok(state.house_service.list_houses().await?)
}

async fn create_house(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateHouseRequest>,
) -> Result<(StatusCode, Json<HouseResponse>), AppError> {
    debug!("Create house request: {}", request.community);

    let response = state.house_service.create_house(request).await?;
    Ok(created(response))
}

async fn get_house(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<HouseResponse> {
    let house_id: HouseId = parse_id(&id, "house")?;
    found(state.house_service.get_house(house_id).await?, "House", house_id)
}

async fn update_house(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateHouseRequest>,
) -> ApiResult<HouseResponse> {
    debug!("Update house request: {}", request.id);

    ok(state.house_service.update_house(request).await?)
}

async fn delete_house(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete house request: {}", id);

    let house_id: HouseId = parse_id(&id, "house")?;
    state.house_service.delete_house(house_id).await?;

    Ok(no_content())
}
