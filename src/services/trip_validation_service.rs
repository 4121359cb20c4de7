//! Validación de viajes
//!
//! Antes de crear o modificar un viaje se comprueban las referencias
//! (lugares y operador) y el orden de las fechas. Todas las reglas se
//! evalúan y se devuelven juntas, en orden fijo; una lista vacía significa
//! que el viaje es válido.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::debug;

use crate::models::{Operator, Place, TripData};
use crate::repositories::{OperatorReader, PlaceReader};
use crate::utils::errors::{AppError, AppResult};

/// Margen hacia el pasado aceptado para la fecha de inicio de un viaje nuevo
pub const PAST_START_TOLERANCE_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TripValidationError {
    #[error("El lugar de origen especificado no existe")]
    OriginNotFound,
    #[error("El lugar de destino especificado no existe")]
    DestinationNotFound,
    #[error("El origen y destino no pueden ser iguales")]
    SameOriginAndDestination,
    #[error("El operador especificado no existe")]
    OperatorNotFound,
    #[error("La fecha de inicio debe ser anterior a la fecha de fin")]
    StartNotBeforeEnd,
    #[error("La fecha programada no puede ser en el pasado")]
    StartInPast,
    #[error("El lugar de origen no está habilitado como origen")]
    OriginNotAllowed,
    #[error("El lugar de destino no está habilitado como destino")]
    DestinationNotAllowed,
}

/// Datos de referencia que necesita la validación
#[derive(Debug, Clone, Default)]
pub struct ReferenceFacts {
    pub origin: Option<Place>,
    pub destination: Option<Place>,
    pub operator: Option<Operator>,
}

/// Aplicar las reglas sobre datos ya cargados.
///
/// `is_new` activa la regla de fecha en el pasado, que solo aplica al crear.
pub fn check_trip(
    trip: &TripData,
    facts: &ReferenceFacts,
    is_new: bool,
    now: DateTime<Utc>,
) -> Vec<TripValidationError> {
    let mut errors = Vec::new();

    if facts.origin.is_none() {
        errors.push(TripValidationError::OriginNotFound);
    }
    if facts.destination.is_none() {
        errors.push(TripValidationError::DestinationNotFound);
    }
    if trip.origin_id == trip.destination_id {
        errors.push(TripValidationError::SameOriginAndDestination);
    }
    if facts.operator.is_none() {
        errors.push(TripValidationError::OperatorNotFound);
    }
    if trip.scheduled_start_date_time >= trip.scheduled_end_date_time {
        errors.push(TripValidationError::StartNotBeforeEnd);
    }
    if is_new
        && trip.scheduled_start_date_time < now - Duration::minutes(PAST_START_TOLERANCE_MINUTES)
    {
        errors.push(TripValidationError::StartInPast);
    }
    if matches!(&facts.origin, Some(origin) if !origin.data.is_origin_allowed) {
        errors.push(TripValidationError::OriginNotAllowed);
    }
    if matches!(&facts.destination, Some(destination) if !destination.data.is_destination_allowed) {
        errors.push(TripValidationError::DestinationNotAllowed);
    }

    errors
}

/// Convertir la lista de errores en un `AppError::Validation` (400)
pub fn validation_failure(errors: &[TripValidationError]) -> AppError {
    AppError::Validation(errors.iter().map(|e| e.to_string()).collect())
}

/// Validador con acceso de solo lectura a los catálogos
pub struct TripValidator<'a> {
    places: &'a dyn PlaceReader,
    operators: &'a dyn OperatorReader,
}

impl<'a> TripValidator<'a> {
    pub fn new(places: &'a dyn PlaceReader, operators: &'a dyn OperatorReader) -> Self {
        Self { places, operators }
    }

    pub async fn gather(&self, trip: &TripData) -> AppResult<ReferenceFacts> {
        let origin = self.places.find_place(trip.origin_id).await?;
        let destination = if trip.destination_id == trip.origin_id {
            origin.clone()
        } else {
            self.places.find_place(trip.destination_id).await?
        };
        let operator = self.operators.find_operator(trip.operator_id).await?;

        Ok(ReferenceFacts {
            origin,
            destination,
            operator,
        })
    }

    /// Validar un viaje; falla con `AppError::Validation` si alguna regla no se cumple
    pub async fn validate(&self, trip: &TripData, is_new: bool) -> AppResult<ReferenceFacts> {
        let facts = self.gather(trip).await?;
        let errors = check_trip(trip, &facts, is_new, Utc::now());

        if !errors.is_empty() {
            debug!("🚫 Viaje rechazado: {} errores de validación", errors.len());
            return Err(validation_failure(&errors));
        }
        Ok(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditFields, AuditStamp, Entity, OperatorData, PlaceData};
    use crate::repositories::{EntityWriter, MemoryStore};

    fn audit() -> AuditFields {
        AuditFields::created(&AuditStamp::new(Utc::now(), None))
    }

    fn place(id: i32, name: &str) -> Place {
        Place::assemble(id, PlaceData::named(name), audit())
    }

    fn all_present() -> ReferenceFacts {
        ReferenceFacts {
            origin: Some(place(1, "Monterrey")),
            destination: Some(place(2, "Puebla")),
            operator: Some(Operator::assemble(1, OperatorData::new("Ana", "Pérez"), audit())),
        }
    }

    fn future_trip(origin: i32, destination: i32) -> TripData {
        let start = Utc::now() + Duration::hours(1);
        TripData::scheduled(origin, destination, 1, start, start + Duration::hours(4))
    }

    #[test]
    fn test_valid_trip_has_no_errors() {
        assert!(check_trip(&future_trip(1, 2), &all_present(), true, Utc::now()).is_empty());
    }

    #[test]
    fn test_same_origin_and_destination() {
        let facts = ReferenceFacts {
            destination: Some(place(1, "Monterrey")),
            ..all_present()
        };
        let errors = check_trip(&future_trip(1, 1), &facts, true, Utc::now());
        assert_eq!(errors, vec![TripValidationError::SameOriginAndDestination]);
        assert_eq!(errors[0].to_string(), "El origen y destino no pueden ser iguales");
    }

    #[test]
    fn test_missing_operator_is_a_single_error() {
        let facts = ReferenceFacts {
            operator: None,
            ..all_present()
        };
        let errors = check_trip(&future_trip(1, 2), &facts, true, Utc::now());
        assert_eq!(errors, vec![TripValidationError::OperatorNotFound]);
    }

    #[test]
    fn test_start_must_precede_end() {
        let mut trip = future_trip(1, 2);
        trip.scheduled_end_date_time = trip.scheduled_start_date_time;
        let errors = check_trip(&trip, &all_present(), false, Utc::now());
        assert_eq!(errors, vec![TripValidationError::StartNotBeforeEnd]);
    }

    #[test]
    fn test_past_start_only_checked_for_new_trips() {
        let now = Utc::now();
        let start = now - Duration::hours(2);
        let trip = TripData::scheduled(1, 2, 1, start, now + Duration::hours(1));

        assert_eq!(
            check_trip(&trip, &all_present(), true, now),
            vec![TripValidationError::StartInPast]
        );
        assert!(check_trip(&trip, &all_present(), false, now).is_empty());

        let recent = TripData::scheduled(1, 2, 1, now - Duration::minutes(30), now + Duration::hours(1));
        assert!(check_trip(&recent, &all_present(), true, now).is_empty());
    }

    #[test]
    fn test_errors_are_collected_in_order() {
        let now = Utc::now();
        let trip = TripData::scheduled(5, 5, 9, now - Duration::days(1), now - Duration::days(2));
        let errors = check_trip(&trip, &ReferenceFacts::default(), true, now);

        assert_eq!(
            errors,
            vec![
                TripValidationError::OriginNotFound,
                TripValidationError::DestinationNotFound,
                TripValidationError::SameOriginAndDestination,
                TripValidationError::OperatorNotFound,
                TripValidationError::StartNotBeforeEnd,
                TripValidationError::StartInPast,
            ]
        );
    }

    #[test]
    fn test_disabled_places_are_rejected() {
        let mut facts = all_present();
        if let Some(origin) = facts.origin.as_mut() {
            origin.data.is_origin_allowed = false;
        }
        if let Some(destination) = facts.destination.as_mut() {
            destination.data.is_destination_allowed = false;
        }

        let errors = check_trip(&future_trip(1, 2), &facts, true, Utc::now());
        assert_eq!(
            errors,
            vec![
                TripValidationError::OriginNotAllowed,
                TripValidationError::DestinationNotAllowed
            ]
        );
    }

    #[tokio::test]
    async fn test_validator_reads_reference_stores() {
        let store = MemoryStore::new();
        let stamp = AuditStamp::new(Utc::now(), None);
        let origin: Place = store.insert(&PlaceData::named("Cancún"), &stamp).await.unwrap();
        let destination: Place = store.insert(&PlaceData::named("Puebla"), &stamp).await.unwrap();
        let _: Operator =
            store.insert(&OperatorData::new("Ana", "Pérez"), &stamp).await.unwrap();

        let validator = TripValidator::new(&store, &store);

        let mut trip = future_trip(origin.id, destination.id);
        assert!(validator.validate(&trip, true).await.is_ok());

        trip.operator_id = 42;
        match validator.validate(&trip, true).await {
            Err(AppError::Validation(messages)) => {
                assert_eq!(messages, vec!["El operador especificado no existe".to_string()]);
            }
            other => panic!("se esperaba error de validación, se obtuvo {:?}", other),
        }
    }
}
