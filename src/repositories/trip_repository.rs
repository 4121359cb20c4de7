use async_trait::async_trait;
use sqlx::PgPool;

use super::{map_db_error, EntityWriter, TripReader};
use crate::models::{AuditStamp, Trip, TripData, TripStatus};
use crate::utils::errors::AppResult;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityWriter<Trip> for TripRepository {
    async fn insert(&self, data: &TripData, stamp: &AuditStamp) -> AppResult<Trip> {
        let result = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                origin_id, destination_id, operator_id,
                scheduled_start_date_time, scheduled_end_date_time,
                actual_start_date_time, actual_end_date_time, status,
                estimated_distance, actual_distance, notes, vehicle_id,
                created_at, modified_at, created_by, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(data.origin_id)
        .bind(data.destination_id)
        .bind(data.operator_id)
        .bind(data.scheduled_start_date_time)
        .bind(data.scheduled_end_date_time)
        .bind(data.actual_start_date_time)
        .bind(data.actual_end_date_time)
        .bind(data.status)
        .bind(data.estimated_distance)
        .bind(data.actual_distance)
        .bind(&data.notes)
        .bind(&data.vehicle_id)
        .bind(stamp.at)
        .bind(&stamp.by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error creando viaje"))?;

        Ok(result)
    }

    async fn update(&self, id: i32, data: &TripData, stamp: &AuditStamp) -> AppResult<Option<Trip>> {
        let result = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET origin_id = $2, destination_id = $3, operator_id = $4,
                scheduled_start_date_time = $5, scheduled_end_date_time = $6,
                actual_start_date_time = $7, actual_end_date_time = $8, status = $9,
                estimated_distance = $10, actual_distance = $11, notes = $12, vehicle_id = $13,
                modified_at = $14, modified_by = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.origin_id)
        .bind(data.destination_id)
        .bind(data.operator_id)
        .bind(data.scheduled_start_date_time)
        .bind(data.scheduled_end_date_time)
        .bind(data.actual_start_date_time)
        .bind(data.actual_end_date_time)
        .bind(data.status)
        .bind(data.estimated_distance)
        .bind(data.actual_distance)
        .bind(&data.notes)
        .bind(&data.vehicle_id)
        .bind(stamp.at)
        .bind(&stamp.by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error actualizando viaje"))?;

        Ok(result)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error eliminando viaje"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TripReader for TripRepository {
    async fn find_trip(&self, id: i32) -> AppResult<Option<Trip>> {
        let result = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error buscando viaje"))?;

        Ok(result)
    }

    async fn list_trips_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Trip>> {
        let result = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips ORDER BY scheduled_start_date_time DESC, id DESC OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error listando viajes"))?;

        Ok(result)
    }

    async fn list_trips_by_status(&self, status: TripStatus) -> AppResult<Vec<Trip>> {
        let result = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE status = $1 ORDER BY scheduled_start_date_time DESC, id DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error listando viajes por estado"))?;

        Ok(result)
    }

    async fn place_has_trips(&self, place_id: i32) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM trips WHERE origin_id = $1 OR destination_id = $1)",
        )
        .bind(place_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error verificando viajes del lugar"))?;

        Ok(result.0)
    }

    async fn operator_has_trips(&self, operator_id: i32) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM trips WHERE operator_id = $1)")
                .bind(operator_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "Error verificando viajes del operador"))?;

        Ok(result.0)
    }
}
