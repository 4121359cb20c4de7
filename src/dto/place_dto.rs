use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Place, PlaceData, PlaceStatus, PlaceType};
use crate::utils::validation::{
    normalize_optional, validate_latitude, validate_longitude, validate_not_blank,
};

// Request para crear o reemplazar un lugar
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRequest {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(max = 10))]
    pub code: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_latitude")]
    pub latitude: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_longitude")]
    pub longitude: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub place_type: Option<PlaceType>,
    #[serde(default)]
    pub status: Option<PlaceStatus>,
    #[serde(default)]
    pub is_origin_allowed: Option<bool>,
    #[serde(default)]
    pub is_destination_allowed: Option<bool>,
    #[validate(length(max = 100))]
    pub contact_person: Option<String>,
    #[validate(length(max = 20))]
    pub contact_phone: Option<String>,
    #[validate(email, length(max = 100))]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub operating_hours_start: Option<NaiveTime>,
    #[serde(default)]
    pub operating_hours_end: Option<NaiveTime>,
    #[validate(length(max = 1000))]
    pub special_instructions: Option<String>,
}

impl PlaceRequest {
    /// Convertir el request en columnas aplicando valores por defecto
    pub fn into_data(self) -> PlaceData {
        let defaults = PlaceData::named(self.name.trim());
        PlaceData {
            code: normalize_optional(self.code),
            description: normalize_optional(self.description),
            address: normalize_optional(self.address),
            city: normalize_optional(self.city),
            state: normalize_optional(self.state),
            country: normalize_optional(self.country).or(defaults.country.clone()),
            postal_code: normalize_optional(self.postal_code),
            latitude: self.latitude,
            longitude: self.longitude,
            place_type: self.place_type.unwrap_or(defaults.place_type),
            status: self.status.unwrap_or(defaults.status),
            is_origin_allowed: self.is_origin_allowed.unwrap_or(defaults.is_origin_allowed),
            is_destination_allowed: self
                .is_destination_allowed
                .unwrap_or(defaults.is_destination_allowed),
            contact_person: normalize_optional(self.contact_person),
            contact_phone: normalize_optional(self.contact_phone),
            contact_email: normalize_optional(self.contact_email),
            operating_hours_start: self.operating_hours_start,
            operating_hours_end: self.operating_hours_end,
            special_instructions: normalize_optional(self.special_instructions),
            ..defaults
        }
    }
}

// Response de lugar
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub latitude: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub longitude: Option<Decimal>,
    #[serde(rename = "type")]
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
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        let PlaceData {
            name,
            code,
            description,
            address,
            city,
            state,
            country,
            postal_code,
            latitude,
            longitude,
            place_type,
            status,
            is_origin_allowed,
            is_destination_allowed,
            contact_person,
            contact_phone,
            contact_email,
            operating_hours_start,
            operating_hours_end,
            special_instructions,
        } = place.data;

        Self {
            id: place.id,
            name,
            code,
            description,
            address,
            city,
            state,
            country,
            postal_code,
            latitude,
            longitude,
            place_type,
            status,
            is_origin_allowed,
            is_destination_allowed,
            contact_person,
            contact_phone,
            contact_email,
            operating_hours_start,
            operating_hours_end,
            special_instructions,
            created_at: place.audit.created_at,
            modified_at: place.audit.modified_at,
            created_by: place.audit.created_by,
            modified_by: place.audit.modified_by,
        }
    }
}
