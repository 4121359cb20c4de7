//! Modelos del sistema
//!
//! Este módulo contiene las entidades de dominio (lugares, operadores y
//! viajes) que mapean al schema PostgreSQL.

pub mod audit;
pub mod operator;
pub mod place;
pub mod trip;

pub use audit::{AuditFields, AuditStamp};
pub use operator::{Operator, OperatorData, OperatorStatus, OperatorUniqueField};
pub use place::{Place, PlaceData, PlaceStatus, PlaceType};
pub use trip::{StatusChange, Trip, TripData, TripDetails, TripStatus};

/// Entidad persistida: identificador entero, columnas editables y auditoría
pub trait Entity: Clone + Send + Sync + 'static {
    type Data: Clone + Send + Sync + 'static;

    /// Nombre del recurso en los mensajes de error
    const RESOURCE: &'static str;

    fn id(&self) -> i32;

    fn audit(&self) -> &AuditFields;

    fn assemble(id: i32, data: Self::Data, audit: AuditFields) -> Self;
}
