//! Servicio CRUD genérico
//!
//! Orquesta validación y repositorio para cualquier `Entity`. Las escrituras
//! de una colección se serializan con un mutex para que la revisión de
//! unicidad y la escritura ocurran sin otro escritor en medio.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::{Entity, Fields};
use crate::repositories::Repository;
use crate::services::validator::validate;
use crate::utils::errors::{internal_error, not_found_error, AppResult};

pub struct EntityService<E: Entity> {
    repository: Arc<dyn Repository<E>>,
    write_lock: Mutex<()>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<E>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: &E::Id) -> AppResult<E> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(E::schema().not_found_message, id))
    }

    pub async fn create(&self, payload: Fields) -> AppResult<E> {
        let schema = E::schema();
        let _guard = self.write_lock.lock().await;

        let candidate = payload.normalized(schema).with_defaults(schema);
        let existing = self.conflict_candidates(&candidate).await?;
        validate::<E>(&candidate, &existing, None)?;

        let stored = self.repository.insert(candidate).await?;
        info!("✅ {} creado con id {}", schema.resource, stored.id());
        Ok(stored)
    }

    /// Actualización parcial: solo los campos presentes en `payload`
    /// sobrescriben; la validación corre sobre el resultado fusionado.
    pub async fn update(&self, id: &E::Id, payload: Fields) -> AppResult<E> {
        let schema = E::schema();
        let _guard = self.write_lock.lock().await;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(schema.not_found_message, id))?;

        let patch = payload.normalized(schema);
        debug!("Actualizando {} {} con {} campos", schema.resource, id, patch.len());
        let merged = patch.merged_over(current.to_fields());

        let existing = self.conflict_candidates(&merged).await?;
        validate::<E>(&merged, &existing, Some(id))?;

        let updated = E::from_fields(id.clone(), merged).map_err(|e| {
            internal_error(&format!("Error construyendo {}: {}", schema.resource, e))
        })?;

        let stored = self
            .repository
            .replace(id, updated)
            .await?
            .ok_or_else(|| not_found_error(schema.not_found_message, id))?;
        info!("✏️ {} {} actualizado", schema.resource, id);
        Ok(stored)
    }

    pub async fn delete(&self, id: &E::Id) -> AppResult<E> {
        let schema = E::schema();
        let _guard = self.write_lock.lock().await;

        let removed = self
            .repository
            .remove(id)
            .await?
            .ok_or_else(|| not_found_error(schema.not_found_message, id))?;
        info!("🗑️ {} {} eliminado", schema.resource, id);
        Ok(removed)
    }

    async fn conflict_candidates(&self, candidate: &Fields) -> AppResult<Vec<E>> {
        match E::schema().natural_key {
            Some(key) => match candidate.text(key.field) {
                Some(value) => self.repository.find_by_natural_key(value).await,
                None => Ok(Vec::new()),
            },
            None => Ok(Vec::new()),
        }
    }
}
