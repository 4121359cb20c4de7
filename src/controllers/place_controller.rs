use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::{PaginationQuery, PlaceRequest, PlaceResponse};
use crate::models::{Entity, Place};
use crate::repositories::{Audited, PlaceListing, PlaceReader, Stores, TripReader};
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppResult};
use crate::utils::validation::{normalize_pagination, page_offset};

/// Página de lugares junto con el total del catálogo
pub struct PlacePage {
    pub items: Vec<PlaceResponse>,
    pub total: i64,
}

pub struct PlaceController {
    places: Arc<dyn PlaceReader>,
    trips: Arc<dyn TripReader>,
    writer: Audited<Place>,
}

impl PlaceController {
    pub fn new(stores: Stores, actor: Option<String>) -> Self {
        Self {
            places: stores.places,
            trips: stores.trips,
            writer: Audited::new(stores.place_writer, actor),
        }
    }

    async fn list(&self, listing: PlaceListing) -> AppResult<Vec<PlaceResponse>> {
        let places = self.places.list_places(listing).await?;
        Ok(places.into_iter().map(PlaceResponse::from).collect())
    }

    pub async fn list_active(&self) -> AppResult<Vec<PlaceResponse>> {
        self.list(PlaceListing::Active).await
    }

    pub async fn list_origins(&self) -> AppResult<Vec<PlaceResponse>> {
        self.list(PlaceListing::Origins).await
    }

    pub async fn list_destinations(&self) -> AppResult<Vec<PlaceResponse>> {
        self.list(PlaceListing::Destinations).await
    }

    pub async fn list_all(&self, query: PaginationQuery) -> AppResult<PlacePage> {
        let (page, page_size) = normalize_pagination(query.page, query.page_size);
        let places = self
            .places
            .list_places_page(page_offset(page, page_size), page_size)
            .await?;
        let total = self.places.count_places().await?;

        Ok(PlacePage {
            items: places.into_iter().map(PlaceResponse::from).collect(),
            total,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<PlaceResponse> {
        let place = self
            .places
            .find_place(id)
            .await?
            .ok_or_else(|| not_found_error(Place::RESOURCE, id))?;
        Ok(PlaceResponse::from(place))
    }

    pub async fn create(&self, request: PlaceRequest) -> AppResult<PlaceResponse> {
        request.validate()?;
        let data = request.into_data();

        if let Some(code) = data.code.as_deref() {
            if self.places.place_code_exists(code, None).await? {
                warn!("⚠️ Código de lugar duplicado: {}", code);
                return Err(conflict_error(&format!("Ya existe un lugar con el código '{}'", code)));
            }
        }

        let place = self.writer.create(&data).await?;
        info!("📍 Lugar creado: {} ({})", place.data.name, place.id);
        Ok(PlaceResponse::from(place))
    }

    pub async fn update(&self, id: i32, request: PlaceRequest) -> AppResult<PlaceResponse> {
        if request.id.is_some_and(|body_id| body_id != id) {
            return Err(bad_request_error("El ID de la URL no coincide con el ID del lugar"));
        }
        request.validate()?;

        if self.places.find_place(id).await?.is_none() {
            return Err(not_found_error(Place::RESOURCE, id));
        }

        let data = request.into_data();
        if let Some(code) = data.code.as_deref() {
            if self.places.place_code_exists(code, Some(id)).await? {
                warn!("⚠️ Código de lugar duplicado: {}", code);
                return Err(conflict_error(&format!("Ya existe un lugar con el código '{}'", code)));
            }
        }

        let place = self.writer.update(id, &data).await?;
        info!("📍 Lugar actualizado: {} ({})", place.data.name, place.id);
        Ok(PlaceResponse::from(place))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.places.find_place(id).await?.is_none() {
            return Err(not_found_error(Place::RESOURCE, id));
        }
        if self.trips.place_has_trips(id).await? {
            return Err(conflict_error(
                "No se puede eliminar el lugar porque está siendo usado en viajes",
            ));
        }

        if !self.writer.delete(id).await? {
            return Err(not_found_error(Place::RESOURCE, id));
        }
        info!("🗑️ Lugar eliminado: {}", id);
        Ok(())
    }
}
