//! House service trait definition.

use crate::dto::{CreateHouseRequest, HouseResponse, UpdateHouseRequest};
use async_trait::async_trait;
use estate_core::{EstateResult, HouseId};

/// House service trait.
#[async_trait]
pub trait HouseService: Send + Sync {
    /// Creates a new house. Fails with `Validation` when district or community is blank.
    async fn create_house(&self, request: CreateHouseRequest) -> EstateResult<HouseResponse>;

    /// Gets a house by ID; `None` when no such house exists.
    async fn get_house(&self, id: HouseId) -> EstateResult<Option<HouseResponse>>;

    /// Lists every house ordered by id.
    async fn list_houses(&self) -> EstateResult<Vec<HouseResponse>>;

    /// Overwrites an existing house.
    async fn update_house(&self, request: UpdateHouseRequest) -> EstateResult<HouseResponse>;

    /// Deletes a house. Fails with `NotFound` when no such house exists.
    async fn delete_house(&self, id: HouseId) -> EstateResult<()>;
}
