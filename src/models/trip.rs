//! Modelo de Trip
//!
//! Un viaje es un movimiento programado entre dos lugares realizado por un
//! operador. Este módulo también contiene la lógica de cambio de estado.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::audit::AuditFields;
use super::operator::Operator;
use super::place::Place;
use super::Entity;

/// Estado de un viaje
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum TripStatus {
    #[default]
    Scheduled = 1,
    InProgress = 2,
    Completed = 3,
    Cancelled = 4,
    Delayed = 5,
}

impl TripStatus {
    pub const ALL: [TripStatus; 5] = [
        TripStatus::Scheduled,
        TripStatus::InProgress,
        TripStatus::Completed,
        TripStatus::Cancelled,
        TripStatus::Delayed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "Scheduled",
            TripStatus::InProgress => "InProgress",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
            TripStatus::Delayed => "Delayed",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TripStatus> for i32 {
    fn from(value: TripStatus) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for TripStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        TripStatus::ALL
            .into_iter()
            .find(|status| *status as i32 == value)
            .ok_or_else(|| format!("Estado de viaje inválido: {}", value))
    }
}

/// Acepta el código numérico ("2") o el nombre ("InProgress", sin distinguir mayúsculas)
impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return TripStatus::try_from(code);
        }
        TripStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Estado de viaje inválido: {}", s))
    }
}

/// Columnas editables de un viaje
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TripData {
    pub origin_id: i32,
    pub destination_id: i32,
    pub operator_id: i32,
    pub scheduled_start_date_time: DateTime<Utc>,
    pub scheduled_end_date_time: DateTime<Utc>,
    pub actual_start_date_time: Option<DateTime<Utc>>,
    pub actual_end_date_time: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub estimated_distance: Option<Decimal>,
    pub actual_distance: Option<Decimal>,
    pub notes: Option<String>,
    pub vehicle_id: Option<String>,
}

impl TripData {
    pub fn scheduled(
        origin_id: i32,
        destination_id: i32,
        operator_id: i32,
        scheduled_start_date_time: DateTime<Utc>,
        scheduled_end_date_time: DateTime<Utc>,
    ) -> Self {
        Self {
            origin_id,
            destination_id,
            operator_id,
            scheduled_start_date_time,
            scheduled_end_date_time,
            actual_start_date_time: None,
            actual_end_date_time: None,
            status: TripStatus::Scheduled,
            estimated_distance: None,
            actual_distance: None,
            notes: None,
            vehicle_id: None,
        }
    }

    /// Aplicar un cambio de estado.
    ///
    /// No hay máquina de estados: cualquier estado puede seguir a cualquier
    /// otro. `InProgress` marca el inicio real y `Completed` el fin real
    /// (con `now` si no se proporcionan); el resto de estados no toca fechas.
    pub fn apply_status_change(&mut self, change: &StatusChange, now: DateTime<Utc>) {
        self.status = change.status;

        match change.status {
            TripStatus::InProgress => {
                self.actual_start_date_time = Some(change.actual_start_date_time.unwrap_or(now));
            }
            TripStatus::Completed => {
                self.actual_end_date_time = Some(change.actual_end_date_time.unwrap_or(now));
            }
            TripStatus::Scheduled | TripStatus::Cancelled | TripStatus::Delayed => {}
        }

        if let Some(note) = change.notes.as_deref() {
            self.notes = append_note(self.notes.take(), note);
        }
    }
}

/// Concatenar una nota a las existentes separándolas con "; "
pub fn append_note(existing: Option<String>, note: &str) -> Option<String> {
    if note.is_empty() {
        return existing;
    }
    match existing {
        Some(previous) if !previous.is_empty() => Some(format!("{}; {}", previous, note)),
        _ => Some(note.to_string()),
    }
}

/// Petición de cambio de estado
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: TripStatus,
    pub actual_start_date_time: Option<DateTime<Utc>>,
    pub actual_end_date_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl StatusChange {
    pub fn to(status: TripStatus) -> Self {
        Self {
            status,
            actual_start_date_time: None,
            actual_end_date_time: None,
            notes: None,
        }
    }
}

/// Trip persistido
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Trip {
    pub id: i32,
    #[sqlx(flatten)]
    pub data: TripData,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Entity for Trip {
    type Data = TripData;
    const RESOURCE: &'static str = "Viaje";

    fn id(&self) -> i32 {
        self.id
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn assemble(id: i32, data: TripData, audit: AuditFields) -> Self {
        Self { id, data, audit }
    }
}

/// Viaje con sus datos de referencia cargados
#[derive(Debug, Clone)]
pub struct TripDetails {
    pub trip: Trip,
    pub origin: Option<Place>,
    pub destination: Option<Place>,
    pub operator: Option<Operator>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_trip() -> TripData {
        let start = Utc::now() + Duration::hours(2);
        TripData::scheduled(1, 2, 1, start, start + Duration::hours(5))
    }

    #[test]
    fn test_in_progress_defaults_actual_start_to_now() {
        let mut trip = sample_trip();
        let now = Utc::now();

        trip.apply_status_change(&StatusChange::to(TripStatus::InProgress), now);

        assert_eq!(trip.status, TripStatus::InProgress);
        assert_eq!(trip.actual_start_date_time, Some(now));
        assert_eq!(trip.actual_end_date_time, None);
    }

    #[test]
    fn test_in_progress_uses_supplied_start() {
        let mut trip = sample_trip();
        let started = Utc::now() - Duration::minutes(15);
        let change = StatusChange {
            actual_start_date_time: Some(started),
            ..StatusChange::to(TripStatus::InProgress)
        };

        trip.apply_status_change(&change, Utc::now());

        assert_eq!(trip.actual_start_date_time, Some(started));
    }

    #[test]
    fn test_completed_from_scheduled_is_accepted() {
        let mut trip = sample_trip();
        let now = Utc::now();

        trip.apply_status_change(&StatusChange::to(TripStatus::Completed), now);

        assert_eq!(trip.status, TripStatus::Completed);
        assert_eq!(trip.actual_end_date_time, Some(now));
        assert_eq!(trip.actual_start_date_time, None);
    }

    #[test]
    fn test_other_statuses_leave_timestamps_alone() {
        let mut trip = sample_trip();
        let started = Utc::now() - Duration::hours(1);
        trip.actual_start_date_time = Some(started);

        for status in [TripStatus::Cancelled, TripStatus::Delayed, TripStatus::Scheduled] {
            trip.apply_status_change(&StatusChange::to(status), Utc::now());
            assert_eq!(trip.status, status);
            assert_eq!(trip.actual_start_date_time, Some(started));
            assert_eq!(trip.actual_end_date_time, None);
        }
    }

    #[test]
    fn test_completed_back_to_scheduled_is_accepted() {
        let mut trip = sample_trip();
        trip.apply_status_change(&StatusChange::to(TripStatus::Completed), Utc::now());
        trip.apply_status_change(&StatusChange::to(TripStatus::Scheduled), Utc::now());
        assert_eq!(trip.status, TripStatus::Scheduled);
    }

    #[test]
    fn test_append_note() {
        assert_eq!(append_note(Some("A".to_string()), "B"), Some("A; B".to_string()));
        assert_eq!(append_note(None, "B"), Some("B".to_string()));
        assert_eq!(append_note(Some(String::new()), "B"), Some("B".to_string()));
        assert_eq!(append_note(Some("A".to_string()), ""), Some("A".to_string()));
    }

    #[test]
    fn test_status_change_appends_notes() {
        let mut trip = sample_trip();
        trip.notes = Some("Carga frágil".to_string());
        let change = StatusChange {
            notes: Some("Retraso en aduana".to_string()),
            ..StatusChange::to(TripStatus::Delayed)
        };

        trip.apply_status_change(&change, Utc::now());

        assert_eq!(trip.notes.as_deref(), Some("Carga frágil; Retraso en aduana"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("2".parse::<TripStatus>().unwrap(), TripStatus::InProgress);
        assert_eq!("completed".parse::<TripStatus>().unwrap(), TripStatus::Completed);
        assert_eq!("Delayed".parse::<TripStatus>().unwrap(), TripStatus::Delayed);
        assert!("6".parse::<TripStatus>().is_err());
        assert!("Paused".parse::<TripStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_code() {
        assert_eq!(serde_json::to_value(TripStatus::Cancelled).unwrap(), 4);
        let status: TripStatus = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(status, TripStatus::Scheduled);
    }
}
