//! House entity.

use crate::{Entity, HouseId};
use serde::{Deserialize, Serialize};

/// A house listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    /// Administrative district.
    pub district: String,
    /// Residential community the house belongs to.
    pub community: String,
    /// Layout, e.g. "3室2厅".
    pub house_type: Option<String>,
    pub orientation: Option<String>,
    pub floor: Option<i32>,
    /// Decoration level.
    pub decoration: Option<String>,
    /// Elevator presence as recorded by the source listing.
    pub elevator: Option<String>,
    /// Floor area in square metres.
    pub area: Option<i32>,
    /// Total price in yuan.
    pub total_price: Option<i32>,
    pub build_year: Option<i32>,
}

impl Entity for House {
    type Id = HouseId;

    fn id(&self) -> HouseId {
        self.id
    }

    fn set_id(&mut self, id: HouseId) {
        self.id = id;
    }
}
