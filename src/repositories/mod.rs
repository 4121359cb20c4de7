//! Capa de persistencia
//!
//! Los controladores no conocen la base de datos: dependen de puertos de
//! lectura (`PlaceReader`, `OperatorReader`, `TripReader`) y de escritores
//! genéricos (`EntityWriter`) envueltos en el decorador de auditoría
//! `Audited`. Hay dos implementaciones: PostgreSQL y memoria.

pub mod audited;
pub mod memory_repository;
pub mod operator_repository;
pub mod place_repository;
pub mod trip_repository;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use crate::models::{
    AuditStamp, Entity, Operator, OperatorUniqueField, Place, Trip, TripStatus,
};
use crate::utils::errors::{AppError, AppResult};

pub use audited::Audited;
pub use memory_repository::MemoryStore;
pub use operator_repository::OperatorRepository;
pub use place_repository::PlaceRepository;
pub use trip_repository::TripRepository;

/// Escritura de una entidad; las marcas de auditoría llegan ya calculadas
#[async_trait]
pub trait EntityWriter<E: Entity>: Send + Sync {
    async fn insert(&self, data: &E::Data, stamp: &AuditStamp) -> AppResult<E>;

    /// `None` si el id no existe
    async fn update(&self, id: i32, data: &E::Data, stamp: &AuditStamp) -> AppResult<Option<E>>;

    /// `false` si el id no existe
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Filtros de catálogo de lugares (siempre ordenados por nombre)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceListing {
    Active,
    Origins,
    Destinations,
}

#[async_trait]
pub trait PlaceReader: Send + Sync {
    async fn find_place(&self, id: i32) -> AppResult<Option<Place>>;

    async fn list_places(&self, listing: PlaceListing) -> AppResult<Vec<Place>>;

    /// Todos los lugares por nombre, paginados
    async fn list_places_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Place>>;

    async fn count_places(&self) -> AppResult<i64>;

    async fn place_code_exists(&self, code: &str, exclude_id: Option<i32>) -> AppResult<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorListing {
    /// Activos, por apellido y nombre
    Active,
    /// Todos, por nombre y apellido
    All,
}

#[async_trait]
pub trait OperatorReader: Send + Sync {
    async fn find_operator(&self, id: i32) -> AppResult<Option<Operator>>;

    async fn list_operators(&self, listing: OperatorListing) -> AppResult<Vec<Operator>>;

    async fn operator_field_taken(
        &self,
        field: OperatorUniqueField,
        value: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool>;
}

#[async_trait]
pub trait TripReader: Send + Sync {
    async fn find_trip(&self, id: i32) -> AppResult<Option<Trip>>;

    /// Viajes por fecha programada descendente, paginados
    async fn list_trips_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Trip>>;

    async fn list_trips_by_status(&self, status: TripStatus) -> AppResult<Vec<Trip>>;

    /// Algún viaje usa el lugar como origen o destino
    async fn place_has_trips(&self, place_id: i32) -> AppResult<bool>;

    async fn operator_has_trips(&self, operator_id: i32) -> AppResult<bool>;
}

/// Conjunto de puertos que se inyecta en el estado de la aplicación
#[derive(Clone)]
pub struct Stores {
    pub places: Arc<dyn PlaceReader>,
    pub place_writer: Arc<dyn EntityWriter<Place>>,
    pub operators: Arc<dyn OperatorReader>,
    pub operator_writer: Arc<dyn EntityWriter<Operator>>,
    pub trips: Arc<dyn TripReader>,
    pub trip_writer: Arc<dyn EntityWriter<Trip>>,
}

impl Stores {
    /// Repositorios respaldados por PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        let places = Arc::new(PlaceRepository::new(pool.clone()));
        let operators = Arc::new(OperatorRepository::new(pool.clone()));
        let trips = Arc::new(TripRepository::new(pool));

        Self {
            places: places.clone(),
            place_writer: places,
            operators: operators.clone(),
            operator_writer: operators,
            trips: trips.clone(),
            trip_writer: trips,
        }
    }

    /// Almacén en memoria (desarrollo y tests)
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());

        Self {
            places: store.clone(),
            place_writer: store.clone(),
            operators: store.clone(),
            operator_writer: store.clone(),
            trips: store.clone(),
            trip_writer: store,
        }
    }
}

/// Traducir errores de PostgreSQL: violaciones de unicidad o de clave
/// foránea son conflictos, el resto se registra y se propaga como error de base de datos
pub(crate) fn map_db_error(e: sqlx::Error, context: &str) -> AppError {
    if let Some(db_error) = e.as_database_error() {
        match db_error.code().as_deref() {
            Some("23505") => {
                return AppError::Conflict(format!("{}: ya existe un registro con esos datos", context))
            }
            Some("23503") => {
                return AppError::Conflict(format!("{}: referencia inválida o registro en uso", context))
            }
            _ => {}
        }
    }
    error!("❌ {}: {}", context, e);
    AppError::Database(e)
}
