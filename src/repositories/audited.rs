//! Decorador de auditoría sobre los escritores
//!
//! Toda mutación pasa por aquí: `create` marca creación y modificación,
//! `update` refresca solo la modificación. Los controladores nunca
//! calculan las marcas por su cuenta.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::EntityWriter;
use crate::models::{AuditStamp, Entity};
use crate::utils::errors::{not_found_error, AppResult};

pub struct Audited<E: Entity> {
    inner: Arc<dyn EntityWriter<E>>,
    actor: Option<String>,
}

impl<E: Entity> Audited<E> {
    pub fn new(inner: Arc<dyn EntityWriter<E>>, actor: Option<String>) -> Self {
        Self { inner, actor }
    }

    fn stamp(&self) -> AuditStamp {
        AuditStamp::new(Utc::now(), self.actor.clone())
    }

    pub async fn create(&self, data: &E::Data) -> AppResult<E> {
        let entity = self.inner.insert(data, &self.stamp()).await?;
        debug!("📝 {} {} creado por {:?}", E::RESOURCE, entity.id(), self.actor);
        Ok(entity)
    }

    /// Falla con NotFound si el id no existe
    pub async fn update(&self, id: i32, data: &E::Data) -> AppResult<E> {
        let entity = self
            .inner
            .update(id, data, &self.stamp())
            .await?
            .ok_or_else(|| not_found_error(E::RESOURCE, id))?;
        debug!("📝 {} {} modificado por {:?}", E::RESOURCE, id, self.actor);
        Ok(entity)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        self.inner.delete(id).await
    }
}
