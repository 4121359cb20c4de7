use async_trait::async_trait;
use sqlx::PgPool;

use super::{map_db_error, EntityWriter, OperatorListing, OperatorReader};
use crate::models::{AuditStamp, Operator, OperatorData, OperatorUniqueField};
use crate::utils::errors::AppResult;

pub struct OperatorRepository {
    pool: PgPool,
}

impl OperatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityWriter<Operator> for OperatorRepository {
    async fn insert(&self, data: &OperatorData, stamp: &AuditStamp) -> AppResult<Operator> {
        let result = sqlx::query_as::<_, Operator>(
            r#"
            INSERT INTO operators (
                first_name, last_name, email, phone, employee_id, license_number,
                license_expiry_date, status, date_of_birth, hire_date, address,
                emergency_contact, emergency_phone,
                created_at, modified_at, created_by, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14, $15, $15)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.employee_id)
        .bind(&data.license_number)
        .bind(data.license_expiry_date)
        .bind(data.status)
        .bind(data.date_of_birth)
        .bind(data.hire_date)
        .bind(&data.address)
        .bind(&data.emergency_contact)
        .bind(&data.emergency_phone)
        .bind(stamp.at)
        .bind(&stamp.by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error creando operador"))?;

        Ok(result)
    }

    async fn update(
        &self,
        id: i32,
        data: &OperatorData,
        stamp: &AuditStamp,
    ) -> AppResult<Option<Operator>> {
        let result = sqlx::query_as::<_, Operator>(
            r#"
            UPDATE operators
            SET first_name = $2, last_name = $3, email = $4, phone = $5, employee_id = $6,
                license_number = $7, license_expiry_date = $8, status = $9, date_of_birth = $10,
                hire_date = $11, address = $12, emergency_contact = $13, emergency_phone = $14,
                modified_at = $15, modified_by = $16
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.employee_id)
        .bind(&data.license_number)
        .bind(data.license_expiry_date)
        .bind(data.status)
        .bind(data.date_of_birth)
        .bind(data.hire_date)
        .bind(&data.address)
        .bind(&data.emergency_contact)
        .bind(&data.emergency_phone)
        .bind(stamp.at)
        .bind(&stamp.by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error actualizando operador"))?;

        Ok(result)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM operators WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error eliminando operador"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl OperatorReader for OperatorRepository {
    async fn find_operator(&self, id: i32) -> AppResult<Option<Operator>> {
        let result = sqlx::query_as::<_, Operator>("SELECT * FROM operators WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error buscando operador"))?;

        Ok(result)
    }

    async fn list_operators(&self, listing: OperatorListing) -> AppResult<Vec<Operator>> {
        let sql = match listing {
            OperatorListing::Active => {
                "SELECT * FROM operators WHERE status = 1 ORDER BY last_name, first_name, id"
            }
            OperatorListing::All => "SELECT * FROM operators ORDER BY first_name, last_name, id",
        };

        let result = sqlx::query_as::<_, Operator>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error listando operadores"))?;

        Ok(result)
    }

    async fn operator_field_taken(
        &self,
        field: OperatorUniqueField,
        value: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM operators WHERE {} = $1 AND ($2::INTEGER IS NULL OR id <> $2))",
            field.column()
        );

        let result: (bool,) = sqlx::query_as(&sql)
            .bind(value)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error verificando unicidad de operador"))?;

        Ok(result.0)
    }
}
