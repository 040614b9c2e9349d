//! Repositorios
//!
//! Abstracción de almacenamiento usada por `EntityService`. Hay dos
//! implementaciones: una colección ordenada en memoria y la tabla de
//! concesionarias en PostgreSQL.

pub mod concesionaria_repository;
pub mod memory_repository;

pub use concesionaria_repository::PgConcesionariaRepository;
pub use memory_repository::InMemoryRepository;

use async_trait::async_trait;

use crate::models::{Entity, Fields};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Todas las entidades en el orden del almacén
    async fn find_all(&self) -> AppResult<Vec<E>>;

    async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>>;

    /// Entidades cuya clave natural coincide con `value` según el schema
    /// (exacta o sin distinguir mayúsculas).
    async fn find_by_natural_key(&self, value: &str) -> AppResult<Vec<E>> {
        let Some(key) = E::schema().natural_key else {
            return Ok(Vec::new());
        };
        let all = self.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|e| key.matches(e.to_fields().text(key.field), value))
            .collect())
    }

    /// Guarda campos validados; el almacén asigna la identidad
    async fn insert(&self, fields: Fields) -> AppResult<E>;

    /// Reemplaza la entidad con identidad `id`. `None` si no existe.
    async fn replace(&self, id: &E::Id, entity: E) -> AppResult<Option<E>>;

    /// Elimina y devuelve la entidad. `None` si no existe.
    async fn remove(&self, id: &E::Id) -> AppResult<Option<E>>;
}
