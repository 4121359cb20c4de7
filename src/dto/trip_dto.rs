use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::operator_dto::OperatorResponse;
use super::place_dto::PlaceResponse;
use crate::models::{StatusChange, TripData, TripDetails, TripStatus};
use crate::utils::validation::{normalize_optional, validate_distance};

// Request para crear o reemplazar un viaje
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub origin_id: i32,
    pub destination_id: i32,
    pub operator_id: i32,
    pub scheduled_start_date_time: DateTime<Utc>,
    pub scheduled_end_date_time: DateTime<Utc>,
    #[serde(default)]
    pub actual_start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_end_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<TripStatus>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_distance")]
    pub estimated_distance: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_distance")]
    pub actual_distance: Option<Decimal>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[validate(length(max = 50))]
    pub vehicle_id: Option<String>,
}

impl TripRequest {
    /// Convertir en columnas; sin estado explícito se usa `fallback_status`
    pub fn into_data(self, fallback_status: TripStatus) -> TripData {
        TripData {
            actual_start_date_time: self.actual_start_date_time,
            actual_end_date_time: self.actual_end_date_time,
            status: self.status.unwrap_or(fallback_status),
            estimated_distance: self.estimated_distance,
            actual_distance: self.actual_distance,
            notes: normalize_optional(self.notes),
            vehicle_id: normalize_optional(self.vehicle_id),
            ..TripData::scheduled(
                self.origin_id,
                self.destination_id,
                self.operator_id,
                self.scheduled_start_date_time,
                self.scheduled_end_date_time,
            )
        }
    }
}

// Request de cambio de estado
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripStatusRequest {
    pub status: TripStatus,
    #[serde(default)]
    pub actual_start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_end_date_time: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl From<UpdateTripStatusRequest> for StatusChange {
    fn from(request: UpdateTripStatusRequest) -> Self {
        Self {
            status: request.status,
            actual_start_date_time: request.actual_start_date_time,
            actual_end_date_time: request.actual_end_date_time,
            notes: request.notes.map(|n| n.trim().to_string()),
        }
    }
}

// Parámetros de paginación (?page=&pageSize=)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// Response de viaje con sus datos de referencia
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub id: i32,
    pub origin_id: i32,
    pub origin_name: String,
    pub origin: Option<PlaceResponse>,
    pub destination_id: i32,
    pub destination_name: String,
    pub destination: Option<PlaceResponse>,
    pub operator_id: i32,
    pub operator_name: String,
    pub operator: Option<OperatorResponse>,
    pub scheduled_start_date_time: DateTime<Utc>,
    pub scheduled_end_date_time: DateTime<Utc>,
    pub actual_start_date_time: Option<DateTime<Utc>>,
    pub actual_end_date_time: Option<DateTime<Utc>>,
    pub status: TripStatus,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub estimated_distance: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub actual_distance: Option<Decimal>,
    pub notes: Option<String>,
    pub vehicle_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

impl From<TripDetails> for TripResponse {
    fn from(details: TripDetails) -> Self {
        let TripDetails {
            trip,
            origin,
            destination,
            operator,
        } = details;
        let data = trip.data;

        Self {
            id: trip.id,
            origin_id: data.origin_id,
            origin_name: origin.as_ref().map(|p| p.data.name.clone()).unwrap_or_default(),
            origin: origin.map(PlaceResponse::from),
            destination_id: data.destination_id,
            destination_name: destination
                .as_ref()
                .map(|p| p.data.name.clone())
                .unwrap_or_default(),
            destination: destination.map(PlaceResponse::from),
            operator_id: data.operator_id,
            operator_name: operator.as_ref().map(|o| o.data.full_name()).unwrap_or_default(),
            operator: operator.map(OperatorResponse::from),
            scheduled_start_date_time: data.scheduled_start_date_time,
            scheduled_end_date_time: data.scheduled_end_date_time,
            actual_start_date_time: data.actual_start_date_time,
            actual_end_date_time: data.actual_end_date_time,
            status: data.status,
            estimated_distance: data.estimated_distance,
            actual_distance: data.actual_distance,
            notes: data.notes,
            vehicle_id: data.vehicle_id,
            created_at: trip.audit.created_at,
            modified_at: trip.audit.modified_at,
            created_by: trip.audit.created_by,
            modified_by: trip.audit.modified_by,
        }
    }
}
