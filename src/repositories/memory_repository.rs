use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{Entity, EntityId, Fields};
use crate::repositories::Repository;
use crate::utils::errors::{internal_error, AppResult};

struct Inner<E: Entity> {
    items: Vec<E>,
    last_id: Option<E::Id>,
}

/// Colección en memoria: conserva el orden de inserción y busca por id
/// con un recorrido lineal.
pub struct InMemoryRepository<E: Entity> {
    inner: RwLock<Inner<E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                last_id: None,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> AppResult<Vec<E>> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>> {
        let inner = self.inner.read().await;
        Ok(inner.items.iter().find(|e| e.id() == id).cloned())
    }

    async fn insert(&self, fields: Fields) -> AppResult<E> {
        let mut inner = self.inner.write().await;
        let id = <E::Id as EntityId>::generate(inner.last_id.as_ref());
        let entity = E::from_fields(id.clone(), fields).map_err(|e| {
            internal_error(&format!("Error construyendo {}: {}", E::schema().resource, e))
        })?;

        inner.items.push(entity.clone());
        inner.last_id = Some(id);
        debug!("{} insertado en memoria ({} en total)", E::schema().resource, inner.items.len());
        Ok(entity)
    }

    async fn replace(&self, id: &E::Id, entity: E) -> AppResult<Option<E>> {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.items.iter_mut().find(|e| e.id() == id) else {
            return Ok(None);
        };
        *slot = entity.clone();
        Ok(Some(entity))
    }

    async fn remove(&self, id: &E::Id) -> AppResult<Option<E>> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.items.iter().position(|e| e.id() == id) else {
            return Ok(None);
        };
        Ok(Some(inner.items.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cliente, Concesionaria};
    use serde_json::json;

    fn cliente_fields(nombre: &str) -> Fields {
        serde_json::from_value(json!({
            "nombre": nombre,
            "email": "ana@mail.com",
            "telefono": "5551234",
            "direccion": "Calle 1",
            "ciudad": "CDMX"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_preserves_order_and_assigns_increasing_ids() {
        let repo = InMemoryRepository::<Cliente>::new();
        let a = repo.insert(cliente_fields("A")).await.unwrap();
        let b = repo.insert(cliente_fields("B")).await.unwrap();
        let c = repo.insert(cliente_fields("C")).await.unwrap();

        assert!(a.id < b.id && b.id < c.id);
        let names: Vec<_> = repo.find_all().await.unwrap().into_iter().map(|c| c.nombre).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_replace_and_remove_missing_return_none() {
        let repo = InMemoryRepository::<Cliente>::new();
        let stored = repo.insert(cliente_fields("A")).await.unwrap();

        assert!(repo.replace(&(stored.id + 1), stored.clone()).await.unwrap().is_none());
        assert!(repo.remove(&(stored.id + 1)).await.unwrap().is_none());
        assert_eq!(repo.len().await, 1);

        let removed = repo.remove(&stored.id).await.unwrap();
        assert_eq!(removed, Some(stored));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_rejects_fields_that_do_not_build_entity() {
        let repo = InMemoryRepository::<Cliente>::new();
        let err = repo.insert(Fields::new()).await;
        assert!(err.is_err());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_natural_key_lookup_is_case_insensitive() {
        let repo = InMemoryRepository::<Concesionaria>::new();
        let fields: Fields = serde_json::from_value(json!({
            "nombre": "abc motors",
            "direccion": "Calle 1",
            "telefono": "5550000",
            "ciudad": "Monterrey",
            "gerente": "Marta"
        }))
        .unwrap();
        repo.insert(fields).await.unwrap();

        assert_eq!(repo.find_by_natural_key("ABC Motors").await.unwrap().len(), 1);
        assert!(repo.find_by_natural_key("XYZ Motors").await.unwrap().is_empty());
    }
}
