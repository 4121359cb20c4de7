//! Modelo de Place
//!
//! Catálogo de lugares que pueden ser origen o destino de viajes.
//! Mapea a la tabla places; los enums se guardan como INTEGER.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::audit::AuditFields;
use super::Entity;

/// Tipo de lugar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum PlaceType {
    #[default]
    Terminal = 1,
    Station = 2,
    Warehouse = 3,
    Port = 4,
    Airport = 5,
    DistributionCenter = 6,
    CustomerSite = 7,
    Other = 8,
}

impl From<PlaceType> for i32 {
    fn from(value: PlaceType) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for PlaceType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlaceType::Terminal),
            2 => Ok(PlaceType::Station),
            3 => Ok(PlaceType::Warehouse),
            4 => Ok(PlaceType::Port),
            5 => Ok(PlaceType::Airport),
            6 => Ok(PlaceType::DistributionCenter),
            7 => Ok(PlaceType::CustomerSite),
            8 => Ok(PlaceType::Other),
            other => Err(format!("Tipo de lugar inválido: {}", other)),
        }
    }
}

/// Estado de un lugar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum PlaceStatus {
    #[default]
    Active = 1,
    Inactive = 2,
    Maintenance = 3,
    Closed = 4,
}

impl From<PlaceStatus> for i32 {
    fn from(value: PlaceStatus) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for PlaceStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlaceStatus::Active),
            2 => Ok(PlaceStatus::Inactive),
            3 => Ok(PlaceStatus::Maintenance),
            4 => Ok(PlaceStatus::Closed),
            other => Err(format!("Estado de lugar inválido: {}", other)),
        }
    }
}

/// Columnas editables de un lugar
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PlaceData {
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub place_type: PlaceType,
    pub status: PlaceStatus,
    pub is_origin_allowed: bool,
    pub is_destination_allowed: bool,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub operating_hours_start: Option<NaiveTime>,
    pub operating_hours_end: Option<NaiveTime>,
    pub special_instructions: Option<String>,
}

impl PlaceData {
    /// Lugar mínimo con los valores por defecto del catálogo
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            description: None,
            address: None,
            city: None,
            state: None,
            country: Some("Mexico".to_string()),
            postal_code: None,
            latitude: None,
            longitude: None,
            place_type: PlaceType::default(),
            status: PlaceStatus::default(),
            is_origin_allowed: true,
            is_destination_allowed: true,
            contact_person: None,
            contact_phone: None,
            contact_email: None,
            operating_hours_start: None,
            operating_hours_end: None,
            special_instructions: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlaceStatus::Active
    }

    /// Lugar ofrecido como origen en el catálogo
    pub fn is_listed_as_origin(&self) -> bool {
        self.is_active() && self.is_origin_allowed
    }

    /// Lugar ofrecido como destino en el catálogo
    pub fn is_listed_as_destination(&self) -> bool {
        self.is_active() && self.is_destination_allowed
    }
}

/// Place persistido
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Place {
    pub id: i32,
    #[sqlx(flatten)]
    pub data: PlaceData,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Entity for Place {
    type Data = PlaceData;
    const RESOURCE: &'static str = "Lugar";

    fn id(&self) -> i32 {
        self.id
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn assemble(id: i32, data: PlaceData, audit: AuditFields) -> Self {
        Self { id, data, audit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_codes_round_trip_through_serde() {
        assert_eq!(serde_json::to_value(PlaceType::DistributionCenter).unwrap(), 6);
        let status: PlaceStatus = serde_json::from_value(serde_json::json!(3)).unwrap();
        assert_eq!(status, PlaceStatus::Maintenance);
        assert!(serde_json::from_value::<PlaceType>(serde_json::json!(9)).is_err());
    }

    #[test]
    fn test_catalog_listing_rules() {
        let mut place = PlaceData::named("Puerto de Veracruz");
        assert!(place.is_listed_as_origin());
        assert!(place.is_listed_as_destination());

        place.is_destination_allowed = false;
        assert!(!place.is_listed_as_destination());

        place.status = PlaceStatus::Closed;
        assert!(!place.is_listed_as_origin());
    }
}
