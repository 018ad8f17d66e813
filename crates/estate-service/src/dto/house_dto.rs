//! House-related DTOs.

use estate_core::validation::rules::not_blank;
use estate_core::{House, HouseId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new house.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHouseRequest {
    #[validate(
        custom(function = "not_blank", message = "District is required"),
        length(max = 255)
    )]
    pub district: String,

    #[validate(
        custom(function = "not_blank", message = "Community is required"),
        length(max = 255)
    )]
    pub community: String,

    #[validate(length(max = 255))]
    pub house_type: Option<String>,

    #[validate(length(max = 255))]
    pub orientation: Option<String>,

    pub floor: Option<i32>,

    #[validate(length(max = 255))]
    pub decoration: Option<String>,

    #[validate(length(max = 255))]
    pub elevator: Option<String>,

    pub area: Option<i32>,

    pub total_price: Option<i32>,

    pub build_year: Option<i32>,
}

impl CreateHouseRequest {
    /// Builds the not-yet-stored entity.
    #[must_use]
    pub fn into_house(self) -> House {
        House {
            id: HouseId::UNASSIGNED,
            district: self.district,
            community: self.community,
            house_type: self.house_type,
            orientation: self.orientation,
            floor: self.floor,
            decoration: self.decoration,
            elevator: self.elevator,
            area: self.area,
            total_price: self.total_price,
            build_year: self.build_year,
        }
    }
}

/// Request to overwrite an existing house. Every field is replaced.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateHouseRequest {
    pub id: HouseId,

    #[validate(
        custom(function = "not_blank", message = "District is required"),
        length(max = 255)
    )]
    pub district: String,

    #[validate(
        custom(function = "not_blank", message = "Community is required"),
        length(max = 255)
    )]
    pub community: String,

    #[validate(length(max = 255))]
    pub house_type: Option<String>,

    #[validate(length(max = 255))]
    pub orientation: Option<String>,

    pub floor: Option<i32>,

    #[validate(length(max = 255))]
    pub decoration: Option<String>,

    #[validate(length(max = 255))]
    pub elevator: Option<String>,

    pub area: Option<i32>,

    pub total_price: Option<i32>,

    pub build_year: Option<i32>,
}

impl UpdateHouseRequest {
    #[must_use]
    pub fn into_house(self) -> House {
        House {
            id: self.id,
            district: self.district,
            community: self.community,
            house_type: self.house_type,
            orientation: self.orientation,
            floor: self.floor,
            decoration: self.decoration,
            elevator: self.elevator,
            area: self.area,
            total_price: self.total_price,
            build_year: self.build_year,
        }
    }
}

/// House response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseResponse {
    pub id: HouseId,
    pub district: String,
    pub community: String,
    pub house_type: Option<String>,
    pub orientation: Option<String>,
    pub floor: Option<i32>,
    pub decoration: Option<String>,
    pub elevator: Option<String>,
    pub area: Option<i32>,
    pub total_price: Option<i32>,
    pub build_year: Option<i32>,
}

impl From<House> for HouseResponse {
    fn from(house: House) -> Self {
        Self {
            id: house.id,
            district: house.district,
            community: house.community,
            house_type: house.house_type,
            orientation: house.orientation,
            floor: house.floor,
            decoration: house.decoration,
            elevator: house.elevator,
            area: house.area,
            total_price: house.total_price,
            build_year: house.build_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::{EstateError, ValidateExt};

    fn request() -> CreateHouseRequest {
        serde_json::from_value(serde_json::json!({
            "district": "Haidian",
            "community": "Lakeside",
            "floor": -1,
            "area": 88
        }))
        .unwrap()
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let request = request();
        assert!(request.validate_request().is_ok());
        assert_eq!(request.house_type, None);
        assert_eq!(request.floor, Some(-1));
    }

    #[test]
    fn test_blank_district_rejected() {
        let mut request = request();
        request.district = String::new();
        assert!(matches!(
            request.validate_request(),
            Err(EstateError::Validation(msg)) if msg.contains("District is required")
        ));
    }

    #[test]
    fn test_numeric_fields_are_unconstrained() {
        let mut request = request();
        request.area = Some(-3);
        request.total_price = Some(-5);
        request.build_year = Some(-1);
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_long_elevator_rejected() {
        let mut request = request();
        request.elevator = Some("e".repeat(256));
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_into_house_is_unassigned() {
        let house = request().into_house();
        assert!(!house.id.is_assigned());
        assert_eq!(house.area, Some(88));
    }
}
