use async_trait::async_trait;
use sqlx::PgPool;

use super::{map_db_error, EntityWriter, PlaceListing, PlaceReader};
use crate::models::{AuditStamp, Place, PlaceData};
use crate::utils::errors::AppResult;

pub struct PlaceRepository {
    pool: PgPool,
}

impl PlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityWriter<Place> for PlaceRepository {
    async fn insert(&self, data: &PlaceData, stamp: &AuditStamp) -> AppResult<Place> {
        let result = sqlx::query_as::<_, Place>(
            r#"
            INSERT INTO places (
                name, code, description, address, city, state, country, postal_code,
                latitude, longitude, place_type, status, is_origin_allowed, is_destination_allowed,
                contact_person, contact_phone, contact_email,
                operating_hours_start, operating_hours_end, special_instructions,
                created_at, modified_at, created_by, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $21, $22, $22)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.postal_code)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.place_type)
        .bind(data.status)
        .bind(data.is_origin_allowed)
        .bind(data.is_destination_allowed)
        .bind(&data.contact_person)
        .bind(&data.contact_phone)
        .bind(&data.contact_email)
        .bind(data.operating_hours_start)
        .bind(data.operating_hours_end)
        .bind(&data.special_instructions)
        .bind(stamp.at)
        .bind(&stamp.by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error creando lugar"))?;

        Ok(result)
    }

    async fn update(&self, id: i32, data: &PlaceData, stamp: &AuditStamp) -> AppResult<Option<Place>> {
        let result = sqlx::query_as::<_, Place>(
            r#"
            UPDATE places
            SET name = $2, code = $3, description = $4, address = $5, city = $6, state = $7,
                country = $8, postal_code = $9, latitude = $10, longitude = $11,
                place_type = $12, status = $13, is_origin_allowed = $14, is_destination_allowed = $15,
                contact_person = $16, contact_phone = $17, contact_email = $18,
                operating_hours_start = $19, operating_hours_end = $20, special_instructions = $21,
                modified_at = $22, modified_by = $23
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.postal_code)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.place_type)
        .bind(data.status)
        .bind(data.is_origin_allowed)
        .bind(data.is_destination_allowed)
        .bind(&data.contact_person)
        .bind(&data.contact_phone)
        .bind(&data.contact_email)
        .bind(data.operating_hours_start)
        .bind(data.operating_hours_end)
        .bind(&data.special_instructions)
        .bind(stamp.at)
        .bind(&stamp.by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error actualizando lugar"))?;

        Ok(result)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error eliminando lugar"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PlaceReader for PlaceRepository {
    async fn find_place(&self, id: i32) -> AppResult<Option<Place>> {
        let result = sqlx::query_as::<_, Place>("SELECT * FROM places WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error buscando lugar"))?;

        Ok(result)
    }

    async fn list_places(&self, listing: PlaceListing) -> AppResult<Vec<Place>> {
        let filter = match listing {
            PlaceListing::Active => "status = 1",
            PlaceListing::Origins => "status = 1 AND is_origin_allowed",
            PlaceListing::Destinations => "status = 1 AND is_destination_allowed",
        };
        let sql = format!("SELECT * FROM places WHERE {} ORDER BY name, id", filter);

        let result = sqlx::query_as::<_, Place>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error listando lugares"))?;

        Ok(result)
    }

    async fn list_places_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Place>> {
        let result = sqlx::query_as::<_, Place>(
            "SELECT * FROM places ORDER BY name, id OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error listando lugares"))?;

        Ok(result)
    }

    async fn count_places(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM places")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error contando lugares"))?;

        Ok(result.0)
    }

    async fn place_code_exists(&self, code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM places WHERE code = $1 AND ($2::INTEGER IS NULL OR id <> $2))",
        )
        .bind(code)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error verificando código de lugar"))?;

        Ok(result.0)
    }
}
