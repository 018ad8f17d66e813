//! House service implementation.

use crate::cache::{cache_keys, CacheType, EntityCache};
use crate::dto::{CreateHouseRequest, HouseResponse, UpdateHouseRequest};
use crate::house_service::HouseService;
use async_trait::async_trait;
use estate_core::{EstateError, EstateResult, HouseId, ValidateExt};
use estate_repository::HouseRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Cached house service. Same cache layout as the user service.
pub struct HouseServiceImpl {
    house_repository: Arc<dyn HouseRepository>,
    cache: EntityCache,
}

impl HouseServiceImpl {
    #[must_use]
    pub fn new(house_repository: Arc<dyn HouseRepository>, cache: EntityCache) -> Self {
        Self {
            house_repository,
            cache,
        }
    }
}

#[async_trait]
impl HouseService for HouseServiceImpl {
    async fn create_house(&self, request: CreateHouseRequest) -> EstateResult<HouseResponse> {
        debug!("Creating house in {} / {}", request.district, request.community);

        request.validate_request()?;

        let saved_house = self.house_repository.save(&request.into_house()).await?;
        self.cache.evict_all(CacheType::HouseList).await;

        info!("House created: {}", saved_house.id);
        Ok(HouseResponse::from(saved_house))
    }

    async fn get_house(&self, id: HouseId) -> EstateResult<Option<HouseResponse>> {
        debug!("Getting house: {}", id);

        let cache_key = cache_keys::house_by_id(id);
        if let Some(cached) = self.cache.lookup::<HouseResponse>(&cache_key).await {
            debug!("Cache hit for house: {}", id);
            return Ok(Some(cached));
        }

        let Some(house) = self.house_repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let response = HouseResponse::from(house);
        self.cache.store(&cache_key, &response).await;
        Ok(Some(response))
    }

    async fn list_houses(&self) -> EstateResult<Vec<HouseResponse>> {
        let cache_key = cache_keys::house_list();
        if let Some(cached) = self.cache.lookup::<Vec<HouseResponse>>(&cache_key).await {
            debug!("Cache hit for house list");
            return Ok(cached);
        }

        let houses: Vec<HouseResponse> = self
            .house_repository
            .find_all()
            .await?
            .into_iter()
            .map(HouseResponse::from)
            .collect();

        if !houses.is_empty() {
            self.cache.store(&cache_key, &houses).await;
        }

        Ok(houses)
    }

    async fn update_house(&self, request: UpdateHouseRequest) -> EstateResult<HouseResponse> {
        let id = request.id;
        debug!("Updating house: {}", id);

        request.validate_request()?;

        if !self.house_repository.exists_by_id(id).await? {
            return Err(EstateError::not_found("House", id));
        }

        let updated_house = self.house_repository.update(&request.into_house()).await?;
        let response = HouseResponse::from(updated_house);

        self.cache
            .store(&cache_keys::house_by_id(id), &response)
            .await;
        self.cache.evict_all(CacheType::HouseList).await;

        info!("House updated: {}", id);
        Ok(response)
    }

    async fn delete_house(&self, id: HouseId) -> EstateResult<()> {
        debug!("Deleting house: {}", id);

        if !self.house_repository.delete(id).await? {
            return Err(EstateError::not_found("House", id));
        }

        self.cache.evict(&cache_keys::house_by_id(id)).await;
        self.cache.evict_all(CacheType::HouseList).await;

        info!("House deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for HouseServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HouseServiceImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
