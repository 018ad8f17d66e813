//! MySQL house repository implementation.

use super::inserted_id;
use crate::{traits::HouseRepository, DatabasePool};
use async_trait::async_trait;
use estate_core::{EstateError, EstateResult, House, HouseId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

const SELECT_HOUSE: &str = "SELECT id, district, community, house_type, orientation, floor, \
     decoration, elevator, area, total_price, build_year FROM houses";

/// MySQL house repository implementation.
#[derive(Clone)]
pub struct MySqlHouseRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlHouseRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct HouseRow {
    id: i64,
    district: String,
    community: String,
    house_type: Option<String>,
    orientation: Option<String>,
    floor: Option<i32>,
    decoration: Option<String>,
    elevator: Option<String>,
    area: Option<i32>,
    total_price: Option<i32>,
    build_year: Option<i32>,
}

impl From<HouseRow> for House {
    fn from(row: HouseRow) -> Self {
        Self {
            id: HouseId::new(row.id),
            district: row.district,
            community: row.community,
            house_type: row.house_type,
            orientation: row.orientation,
            floor: row.floor,
            decoration: row.decoration,
            elevator: row.elevator,
            area: row.area,
            total_price: row.total_price,
            build_year: row.build_year,
        }
    }
}

#[async_trait]
impl HouseRepository for MySqlHouseRepository {
    async fn find_by_id(&self, id: HouseId) -> EstateResult<Option<House>> {
        debug!("Finding house by id: {}", id);

        let row = sqlx::query_as::<_, HouseRow>(&format!("{SELECT_HOUSE} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(House::from))
    }

    async fn find_all(&self) -> EstateResult<Vec<House>> {
        debug!("Finding all houses");

        let rows = sqlx::query_as::<_, HouseRow>(&format!("{SELECT_HOUSE} ORDER BY id"))
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(House::from).collect())
    }

    async fn exists_by_id(&self, id: HouseId) -> EstateResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM houses WHERE id = ? LIMIT 1")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn save(&self, house: &House) -> EstateResult<House> {
        debug!("Saving new house in {}/{}", house.district, house.community);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO houses (district, community, house_type, orientation, floor,
                                decoration, elevator, area, total_price, build_year)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&house.district)
        .bind(&house.community)
        .bind(&house.house_type)
        .bind(&house.orientation)
        .bind(house.floor)
        .bind(&house.decoration)
        .bind(&house.elevator)
        .bind(house.area)
        .bind(house.total_price)
        .bind(house.build_year)
        .execute(&mut *tx)
        .await?;

        let id = inserted_id(result.last_insert_id())?;

        let row = sqlx::query_as::<_, HouseRow>(&format!("{SELECT_HOUSE} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(house_id = id, "House row inserted");
        Ok(row.into())
    }

    async fn update(&self, house: &House) -> EstateResult<House> {
        debug!("Updating house: {}", house.id);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE houses
            SET district = ?, community = ?, house_type = ?, orientation = ?, floor = ?,
                decoration = ?, elevator = ?, area = ?, total_price = ?, build_year = ?
            WHERE id = ?
            "#,
        )
        .bind(&house.district)
        .bind(&house.community)
        .bind(&house.house_type)
        .bind(&house.orientation)
        .bind(house.floor)
        .bind(&house.decoration)
        .bind(&house.elevator)
        .bind(house.area)
        .bind(house.total_price)
        .bind(house.build_year)
        .bind(house.id.into_inner())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, HouseRow>(&format!("{SELECT_HOUSE} WHERE id = ?"))
            .bind(house.id.into_inner())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| EstateError::not_found("House", house.id))?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, id: HouseId) -> EstateResult<bool> {
        debug!("Deleting house: {}", id);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM houses WHERE id = ?")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlHouseRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlHouseRepository").finish_non_exhaustive()
    }
}
