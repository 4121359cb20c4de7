//! Almacén en memoria
//!
//! Implementa los mismos puertos que los repositorios PostgreSQL sobre
//! mapas protegidos por `RwLock`. Se usa con `STORAGE_BACKEND=memory` y en
//! los tests. La unicidad la comprueban los controladores; las claves
//! foráneas se aplican aquí como `ON DELETE RESTRICT`, bajo los mismos
//! bloqueos que la escritura.
//!
//! Orden de bloqueo: lugares, operadores, viajes.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    EntityWriter, OperatorListing, OperatorReader, PlaceListing, PlaceReader, TripReader,
};
use crate::models::{
    AuditFields, AuditStamp, Entity, Operator, OperatorData, OperatorUniqueField, Place,
    PlaceData, Trip, TripData, TripStatus,
};
use crate::utils::errors::{conflict_error, AppError, AppResult};

/// Tabla con identificadores autoincrementales
struct Table<E> {
    rows: BTreeMap<i32, E>,
    last_id: i32,
}

impl<E: Entity> Table<E> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn insert(&mut self, data: &E::Data, stamp: &AuditStamp) -> E {
        self.last_id += 1;
        let entity = E::assemble(self.last_id, data.clone(), AuditFields::created(stamp));
        self.rows.insert(self.last_id, entity.clone());
        entity
    }

    fn update(&mut self, id: i32, data: &E::Data, stamp: &AuditStamp) -> Option<E> {
        let mut audit = self.rows.get(&id)?.audit().clone();
        audit.touch(stamp);
        let entity = E::assemble(id, data.clone(), audit);
        self.rows.insert(id, entity.clone());
        Some(entity)
    }

    fn delete(&mut self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }
}

pub struct MemoryStore {
    places: RwLock<Table<Place>>,
    operators: RwLock<Table<Operator>>,
    trips: RwLock<Table<Trip>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            places: RwLock::new(Table::new()),
            operators: RwLock::new(Table::new()),
            trips: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn reference_conflict(resource: &str) -> AppError {
    conflict_error(&format!("{}: referencia inválida o registro en uso", resource))
}

#[async_trait]
impl EntityWriter<Place> for MemoryStore {
    async fn insert(&self, data: &PlaceData, stamp: &AuditStamp) -> AppResult<Place> {
        Ok(self.places.write().await.insert(data, stamp))
    }

    async fn update(&self, id: i32, data: &PlaceData, stamp: &AuditStamp) -> AppResult<Option<Place>> {
        Ok(self.places.write().await.update(id, data, stamp))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut places = self.places.write().await;
        let trips = self.trips.read().await;
        if trips
            .rows
            .values()
            .any(|t| t.data.origin_id == id || t.data.destination_id == id)
        {
            return Err(reference_conflict(Place::RESOURCE));
        }
        Ok(places.delete(id))
    }
}

#[async_trait]
impl EntityWriter<Operator> for MemoryStore {
    async fn insert(&self, data: &OperatorData, stamp: &AuditStamp) -> AppResult<Operator> {
        Ok(self.operators.write().await.insert(data, stamp))
    }

    async fn update(
        &self,
        id: i32,
        data: &OperatorData,
        stamp: &AuditStamp,
    ) -> AppResult<Option<Operator>> {
        Ok(self.operators.write().await.update(id, data, stamp))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut operators = self.operators.write().await;
        let trips = self.trips.read().await;
        if trips.rows.values().any(|t| t.data.operator_id == id) {
            return Err(reference_conflict(Operator::RESOURCE));
        }
        Ok(operators.delete(id))
    }
}

impl MemoryStore {
    /// Los lugares y el operador del viaje deben existir
    fn references_exist(places: &Table<Place>, operators: &Table<Operator>, data: &TripData) -> bool {
        places.rows.contains_key(&data.origin_id)
            && places.rows.contains_key(&data.destination_id)
            && operators.rows.contains_key(&data.operator_id)
    }
}

#[async_trait]
impl EntityWriter<Trip> for MemoryStore {
    async fn insert(&self, data: &TripData, stamp: &AuditStamp) -> AppResult<Trip> {
        let places = self.places.read().await;
        let operators = self.operators.read().await;
        if !Self::references_exist(&places, &operators, data) {
            return Err(reference_conflict(Trip::RESOURCE));
        }
        Ok(self.trips.write().await.insert(data, stamp))
    }

    async fn update(&self, id: i32, data: &TripData, stamp: &AuditStamp) -> AppResult<Option<Trip>> {
        let places = self.places.read().await;
        let operators = self.operators.read().await;
        if !Self::references_exist(&places, &operators, data) {
            return Err(reference_conflict(Trip::RESOURCE));
        }
        Ok(self.trips.write().await.update(id, data, stamp))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.trips.write().await.delete(id))
    }
}

fn page<T>(rows: Vec<T>, offset: i64, limit: i64) -> Vec<T> {
    let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
    rows.into_iter().skip(offset).take(limit).collect()
}

fn sorted_by_name(mut places: Vec<Place>) -> Vec<Place> {
    places.sort_by_key(|p| (p.data.name.to_lowercase(), p.id));
    places
}

fn sorted_by_schedule(mut trips: Vec<Trip>) -> Vec<Trip> {
    trips.sort_by_key(|t| (Reverse(t.data.scheduled_start_date_time), Reverse(t.id)));
    trips
}

#[async_trait]
impl PlaceReader for MemoryStore {
    async fn find_place(&self, id: i32) -> AppResult<Option<Place>> {
        Ok(self.places.read().await.rows.get(&id).cloned())
    }

    async fn list_places(&self, listing: PlaceListing) -> AppResult<Vec<Place>> {
        let places = self.places.read().await;
        let selected = places
            .rows
            .values()
            .filter(|p| match listing {
                PlaceListing::Active => p.data.is_active(),
                PlaceListing::Origins => p.data.is_listed_as_origin(),
                PlaceListing::Destinations => p.data.is_listed_as_destination(),
            })
            .cloned()
            .collect();
        Ok(sorted_by_name(selected))
    }

    async fn list_places_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Place>> {
        let all = self.places.read().await.rows.values().cloned().collect();
        Ok(page(sorted_by_name(all), offset, limit))
    }

    async fn count_places(&self) -> AppResult<i64> {
        Ok(self.places.read().await.rows.len() as i64)
    }

    async fn place_code_exists(&self, code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .places
            .read()
            .await
            .rows
            .values()
            .any(|p| p.data.code.as_deref() == Some(code) && Some(p.id) != exclude_id))
    }
}

#[async_trait]
impl OperatorReader for MemoryStore {
    async fn find_operator(&self, id: i32) -> AppResult<Option<Operator>> {
        Ok(self.operators.read().await.rows.get(&id).cloned())
    }

    async fn list_operators(&self, listing: OperatorListing) -> AppResult<Vec<Operator>> {
        let operators = self.operators.read().await;
        let mut selected: Vec<Operator> = operators
            .rows
            .values()
            .filter(|o| listing == OperatorListing::All || o.data.is_active())
            .cloned()
            .collect();

        match listing {
            OperatorListing::Active => selected.sort_by(|a, b| {
                (&a.data.last_name, &a.data.first_name).cmp(&(&b.data.last_name, &b.data.first_name))
            }),
            OperatorListing::All => selected.sort_by(|a, b| {
                (&a.data.first_name, &a.data.last_name).cmp(&(&b.data.first_name, &b.data.last_name))
            }),
        }
        Ok(selected)
    }

    async fn operator_field_taken(
        &self,
        field: OperatorUniqueField,
        value: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        Ok(self
            .operators
            .read()
            .await
            .rows
            .values()
            .any(|o| field.value_of(&o.data) == Some(value) && Some(o.id) != exclude_id))
    }
}

#[async_trait]
impl TripReader for MemoryStore {
    async fn find_trip(&self, id: i32) -> AppResult<Option<Trip>> {
        Ok(self.trips.read().await.rows.get(&id).cloned())
    }

    async fn list_trips_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Trip>> {
        let all = self.trips.read().await.rows.values().cloned().collect();
        Ok(page(sorted_by_schedule(all), offset, limit))
    }

    async fn list_trips_by_status(&self, status: TripStatus) -> AppResult<Vec<Trip>> {
        let selected = self
            .trips
            .read()
            .await
            .rows
            .values()
            .filter(|t| t.data.status == status)
            .cloned()
            .collect();
        Ok(sorted_by_schedule(selected))
    }

    async fn place_has_trips(&self, place_id: i32) -> AppResult<bool> {
        Ok(self
            .trips
            .read()
            .await
            .rows
            .values()
            .any(|t| t.data.origin_id == place_id || t.data.destination_id == place_id))
    }

    async fn operator_has_trips(&self, operator_id: i32) -> AppResult<bool> {
        Ok(self
            .trips
            .read()
            .await
            .rows
            .values()
            .any(|t| t.data.operator_id == operator_id))
    }
}
