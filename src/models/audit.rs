//! Campos de auditoría compartidos por todas las entidades
//!
//! Las marcas de creación y modificación no se escriben a mano en cada
//! operación: el decorador `Audited` de la capa de repositorios genera un
//! `AuditStamp` y cada escritor lo persiste.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Columnas de auditoría - mapean a created_at/modified_at/created_by/modified_by
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

/// Momento y actor de una mutación
#[derive(Debug, Clone, PartialEq)]
pub struct AuditStamp {
    pub at: DateTime<Utc>,
    pub by: Option<String>,
}

impl AuditStamp {
    pub fn new(at: DateTime<Utc>, by: Option<String>) -> Self {
        Self { at, by }
    }
}

impl AuditFields {
    /// Campos de una entidad recién creada: creación y modificación coinciden
    pub fn created(stamp: &AuditStamp) -> Self {
        Self {
            created_at: stamp.at,
            modified_at: stamp.at,
            created_by: stamp.by.clone(),
            modified_by: stamp.by.clone(),
        }
    }

    /// Refrescar la marca de modificación conservando la de creación
    pub fn touch(&mut self, stamp: &AuditStamp) {
        self.modified_at = stamp.at;
        self.modified_by = stamp.by.clone();
    }
}
