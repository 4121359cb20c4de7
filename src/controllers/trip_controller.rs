use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::dto::{PaginationQuery, TripRequest, TripResponse, UpdateTripStatusRequest};
use crate::models::{Entity, Operator, Place, StatusChange, Trip, TripDetails, TripStatus};
use crate::repositories::{Audited, OperatorReader, PlaceReader, Stores, TripReader};
use crate::services::trip_validation_service::ReferenceFacts;
use crate::services::TripValidator;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};
use crate::utils::validation::{normalize_pagination, page_offset};

pub struct TripController {
    places: Arc<dyn PlaceReader>,
    operators: Arc<dyn OperatorReader>,
    trips: Arc<dyn TripReader>,
    writer: Audited<Trip>,
}

impl TripController {
    pub fn new(stores: Stores, actor: Option<String>) -> Self {
        Self {
            places: stores.places,
            operators: stores.operators,
            trips: stores.trips,
            writer: Audited::new(stores.trip_writer, actor),
        }
    }

    fn validator(&self) -> TripValidator<'_> {
        TripValidator::new(self.places.as_ref(), self.operators.as_ref())
    }

    async fn find(&self, id: i32) -> AppResult<Trip> {
        self.trips
            .find_trip(id)
            .await?
            .ok_or_else(|| not_found_error(Trip::RESOURCE, id))
    }

    /// Cargar lugares y operadores de una lista de viajes, una vez por id
    async fn with_details(&self, trips: Vec<Trip>) -> AppResult<Vec<TripResponse>> {
        let mut places: HashMap<i32, Option<Place>> = HashMap::new();
        let mut operators: HashMap<i32, Option<Operator>> = HashMap::new();
        let mut responses = Vec::with_capacity(trips.len());

        for trip in trips {
            for place_id in [trip.data.origin_id, trip.data.destination_id] {
                if !places.contains_key(&place_id) {
                    let place = self.places.find_place(place_id).await?;
                    places.insert(place_id, place);
                }
            }
            if !operators.contains_key(&trip.data.operator_id) {
                let operator = self.operators.find_operator(trip.data.operator_id).await?;
                operators.insert(trip.data.operator_id, operator);
            }

            let details = TripDetails {
                origin: places.get(&trip.data.origin_id).cloned().flatten(),
                destination: places.get(&trip.data.destination_id).cloned().flatten(),
                operator: operators.get(&trip.data.operator_id).cloned().flatten(),
                trip,
            };
            responses.push(TripResponse::from(details));
        }

        Ok(responses)
    }

    async fn single_with_details(&self, trip: Trip) -> AppResult<TripResponse> {
        let mut responses = self.with_details(vec![trip]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::Internal("Viaje sin datos de referencia".to_string()))
    }

    fn from_facts(trip: Trip, facts: ReferenceFacts) -> TripResponse {
        TripResponse::from(TripDetails {
            trip,
            origin: facts.origin,
            destination: facts.destination,
            operator: facts.operator,
        })
    }

    pub async fn list(&self, query: PaginationQuery) -> AppResult<Vec<TripResponse>> {
        let (page, page_size) = normalize_pagination(query.page, query.page_size);
        let trips = self
            .trips
            .list_trips_page(page_offset(page, page_size), page_size)
            .await?;
        self.with_details(trips).await
    }

    pub async fn list_by_status(&self, status: TripStatus) -> AppResult<Vec<TripResponse>> {
        let trips = self.trips.list_trips_by_status(status).await?;
        self.with_details(trips).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<TripResponse> {
        let trip = self.find(id).await?;
        self.single_with_details(trip).await
    }

    pub async fn create(&self, request: TripRequest) -> AppResult<TripResponse> {
        request.validate()?;
        let data = request.into_data(TripStatus::Scheduled);
        let facts = self.validator().validate(&data, true).await?;

        let trip = self.writer.create(&data).await?;
        info!(
            "🚚 Viaje creado: {} ({} -> {})",
            trip.id, trip.data.origin_id, trip.data.destination_id
        );
        Ok(Self::from_facts(trip, facts))
    }

    pub async fn update(&self, id: i32, request: TripRequest) -> AppResult<TripResponse> {
        if request.id.is_some_and(|body_id| body_id != id) {
            return Err(bad_request_error("El ID de la URL no coincide con el ID del viaje"));
        }
        request.validate()?;

        let existing = self.find(id).await?;
        let data = request.into_data(existing.data.status);
        let facts = self.validator().validate(&data, false).await?;

        let trip = self.writer.update(id, &data).await?;
        info!("🚚 Viaje actualizado: {}", trip.id);
        Ok(Self::from_facts(trip, facts))
    }

    pub async fn update_status(
        &self,
        id: i32,
        request: UpdateTripStatusRequest,
    ) -> AppResult<TripResponse> {
        request.validate()?;
        let change = StatusChange::from(request);

        let mut trip = self.find(id).await?;
        let previous = trip.data.status;
        trip.data.apply_status_change(&change, Utc::now());

        let trip = self.writer.update(id, &trip.data).await?;
        info!("🔄 Viaje {}: {} -> {}", id, previous, trip.data.status);
        self.single_with_details(trip).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.writer.delete(id).await? {
            return Err(not_found_error(Trip::RESOURCE, id));
        }
        info!("🗑️ Viaje eliminado: {}", id);
        Ok(())
    }
}
