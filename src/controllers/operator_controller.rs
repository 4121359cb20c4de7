use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::{OperatorRequest, OperatorResponse};
use crate::models::{Entity, Operator, OperatorData, OperatorUniqueField};
use crate::repositories::{Audited, OperatorListing, OperatorReader, Stores, TripReader};
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppResult};

const UNIQUE_FIELDS: [OperatorUniqueField; 3] = [
    OperatorUniqueField::EmployeeId,
    OperatorUniqueField::Email,
    OperatorUniqueField::LicenseNumber,
];

pub struct OperatorController {
    operators: Arc<dyn OperatorReader>,
    trips: Arc<dyn TripReader>,
    writer: Audited<Operator>,
}

impl OperatorController {
    pub fn new(stores: Stores, actor: Option<String>) -> Self {
        Self {
            operators: stores.operators,
            trips: stores.trips,
            writer: Audited::new(stores.operator_writer, actor),
        }
    }

    async fn list(&self, listing: OperatorListing) -> AppResult<Vec<OperatorResponse>> {
        let operators = self.operators.list_operators(listing).await?;
        Ok(operators.into_iter().map(OperatorResponse::from).collect())
    }

    pub async fn list_active(&self) -> AppResult<Vec<OperatorResponse>> {
        self.list(OperatorListing::Active).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<OperatorResponse>> {
        self.list(OperatorListing::All).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<OperatorResponse> {
        let operator = self
            .operators
            .find_operator(id)
            .await?
            .ok_or_else(|| not_found_error(Operator::RESOURCE, id))?;
        Ok(OperatorResponse::from(operator))
    }

    /// Rechazar identificadores que ya usa otro operador
    async fn ensure_unique(&self, data: &OperatorData, exclude_id: Option<i32>) -> AppResult<()> {
        for field in UNIQUE_FIELDS {
            if let Some(value) = field.value_of(data) {
                if self.operators.operator_field_taken(field, value, exclude_id).await? {
                    warn!("⚠️ {} duplicado: {}", field.column(), value);
                    return Err(conflict_error(field.duplicate_message()));
                }
            }
        }
        Ok(())
    }

    pub async fn create(&self, request: OperatorRequest) -> AppResult<OperatorResponse> {
        request.validate()?;
        let data = request.into_data();
        self.ensure_unique(&data, None).await?;

        let operator = self.writer.create(&data).await?;
        info!("👤 Operador creado: {} ({})", operator.data.full_name(), operator.id);
        Ok(OperatorResponse::from(operator))
    }

    pub async fn update(&self, id: i32, request: OperatorRequest) -> AppResult<OperatorResponse> {
        if request.id.is_some_and(|body_id| body_id != id) {
            return Err(bad_request_error("El ID de la URL no coincide con el ID del operador"));
        }
        request.validate()?;

        if self.operators.find_operator(id).await?.is_none() {
            return Err(not_found_error(Operator::RESOURCE, id));
        }

        let data = request.into_data();
        self.ensure_unique(&data, Some(id)).await?;

        let operator = self.writer.update(id, &data).await?;
        info!("👤 Operador actualizado: {} ({})", operator.data.full_name(), operator.id);
        Ok(OperatorResponse::from(operator))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.operators.find_operator(id).await?.is_none() {
            return Err(not_found_error(Operator::RESOURCE, id));
        }
        if self.trips.operator_has_trips(id).await? {
            return Err(conflict_error(
                "No se puede eliminar el operador porque tiene viajes asignados",
            ));
        }

        if !self.writer.delete(id).await? {
            return Err(not_found_error(Operator::RESOURCE, id));
        }
        info!("🗑️ Operador eliminado: {}", id);
        Ok(())
    }
}
