use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Concesionaria, Entity, Fields};
use crate::repositories::Repository;
use crate::utils::errors::{AppError, AppResult};

/// Concesionarias persistidas en PostgreSQL. La identidad la genera la base
/// de datos y la búsqueda por nombre no distingue mayúsculas.
///
/// El nombre se compara por la columna `nombre_key`, que guarda el nombre
/// normalizado con la misma regla que usa el repositorio en memoria. Así la
/// comparación no depende de la collation (`LOWER()` bajo `C` no pliega
/// letras acentuadas).
pub struct PgConcesionariaRepository {
    pool: PgPool,
}

impl PgConcesionariaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn text(fields: &Fields, name: &str) -> String {
    fields.text(name).unwrap_or_default().to_string()
}

fn nombre_key(nombre: &str) -> String {
    match Concesionaria::schema().natural_key {
        Some(key) => key.fold(nombre),
        None => nombre.to_string(),
    }
}

#[async_trait]
impl Repository<Concesionaria> for PgConcesionariaRepository {
    async fn find_all(&self) -> AppResult<Vec<Concesionaria>> {
        sqlx::query_as::<_, Concesionaria>("SELECT * FROM concesionarias ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("Error listing concesionarias: {}", e)))
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Concesionaria>> {
        sqlx::query_as::<_, Concesionaria>("SELECT * FROM concesionarias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("Error finding concesionaria: {}", e)))
    }

    async fn find_by_natural_key(&self, value: &str) -> AppResult<Vec<Concesionaria>> {
        sqlx::query_as::<_, Concesionaria>("SELECT * FROM concesionarias WHERE nombre_key = $1")
        .bind(nombre_key(value))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error checking concesionaria name: {}", e)))
    }

    async fn insert(&self, fields: Fields) -> AppResult<Concesionaria> {
        let nombre = text(&fields, "nombre");
        let concesionaria = sqlx::query_as::<_, Concesionaria>(
            r#"
            INSERT INTO concesionarias (nombre, nombre_key, direccion, telefono, ciudad, gerente)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&nombre)
        .bind(nombre_key(&nombre))
        .bind(text(&fields, "direccion"))
        .bind(text(&fields, "telefono"))
        .bind(text(&fields, "ciudad"))
        .bind(text(&fields, "gerente"))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error creating concesionaria: {}", e)))?;

        debug!("Concesionaria {} insertada", concesionaria.id);
        Ok(concesionaria)
    }

    async fn replace(&self, id: &Uuid, entity: Concesionaria) -> AppResult<Option<Concesionaria>> {
        sqlx::query_as::<_, Concesionaria>(
            r#"
            UPDATE concesionarias
            SET nombre = $2, nombre_key = $3, direccion = $4, telefono = $5, ciudad = $6, gerente = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&entity.nombre)
        .bind(nombre_key(&entity.nombre))
        .bind(&entity.direccion)
        .bind(&entity.telefono)
        .bind(&entity.ciudad)
        .bind(&entity.gerente)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error updating concesionaria: {}", e)))
    }

    async fn remove(&self, id: &Uuid) -> AppResult<Option<Concesionaria>> {
        sqlx::query_as::<_, Concesionaria>("DELETE FROM concesionarias WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("Error deleting concesionaria: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::{json, Value};

    use crate::services::EntityService;

    fn fields(value: Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    fn payload(nombre: &str) -> Fields {
        fields(json!({
            "nombre": nombre,
            "direccion": "Av. Constitución 10",
            "telefono": "8180000000",
            "ciudad": "Monterrey",
            "gerente": "Marta Ruiz"
        }))
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requiere PostgreSQL (DATABASE_URL)"]
    async fn test_insert_assigns_id_and_reads_back(pool: PgPool) {
        let repo = PgConcesionariaRepository::new(pool);

        let first = repo.insert(payload("Autos del Norte")).await.unwrap();
        let second = repo.insert(payload("Autos del Sur")).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.nombre, "Autos del Norte");
        assert_eq!(first.gerente, "Marta Ruiz");

        let read = repo.find_by_id(&first.id).await.unwrap();
        assert_eq!(read, Some(first.clone()));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requiere PostgreSQL (DATABASE_URL)"]
    async fn test_find_by_natural_key_ignores_case(pool: PgPool) {
        let repo = PgConcesionariaRepository::new(pool);
        let stored = repo.insert(payload("Camión Motors")).await.unwrap();

        let found = repo.find_by_natural_key("CAMIÓN MOTORS").await.unwrap();
        assert_eq!(found, vec![stored.clone()]);

        let found = repo.find_by_natural_key("camión motors").await.unwrap();
        assert_eq!(found, vec![stored]);

        assert!(repo.find_by_natural_key("Camion Motors").await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requiere PostgreSQL (DATABASE_URL)"]
    async fn test_unique_index_uses_folded_name(pool: PgPool) {
        let repo = PgConcesionariaRepository::new(pool);
        repo.insert(payload("Camión Motors")).await.unwrap();

        let err = repo.insert(payload("CAMIÓN MOTORS")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requiere PostgreSQL (DATABASE_URL)"]
    async fn test_replace_and_remove_unknown_id(pool: PgPool) {
        let repo = PgConcesionariaRepository::new(pool);
        let stored = repo.insert(payload("Autos del Norte")).await.unwrap();

        let missing = Uuid::new_v4();
        let ghost = Concesionaria {
            id: missing,
            ..stored.clone()
        };
        assert!(repo.replace(&missing, ghost).await.unwrap().is_none());
        assert!(repo.remove(&missing).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap(), vec![stored]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requiere PostgreSQL (DATABASE_URL)"]
    async fn test_replace_then_remove_twice(pool: PgPool) {
        let repo = PgConcesionariaRepository::new(pool);
        let stored = repo.insert(payload("Autos del Norte")).await.unwrap();

        let changed = Concesionaria {
            nombre: "Autos del Noreste".to_string(),
            ..stored.clone()
        };
        let replaced = repo.replace(&stored.id, changed).await.unwrap().unwrap();
        assert_eq!(replaced.id, stored.id);
        assert_eq!(replaced.nombre, "Autos del Noreste");
        assert_eq!(replaced.created_at, stored.created_at);
        assert_eq!(repo.find_by_natural_key("autos del noreste").await.unwrap().len(), 1);
        assert!(repo.find_by_natural_key("autos del norte").await.unwrap().is_empty());

        let removed = repo.remove(&stored.id).await.unwrap();
        assert_eq!(removed, Some(replaced));
        assert!(repo.remove(&stored.id).await.unwrap().is_none());
        assert!(repo.find_by_id(&stored.id).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requiere PostgreSQL (DATABASE_URL)"]
    async fn test_service_reports_name_conflict(pool: PgPool) {
        let repository: Arc<dyn Repository<Concesionaria>> =
            Arc::new(PgConcesionariaRepository::new(pool));
        let service = EntityService::<Concesionaria>::new(repository.clone());

        let created = service.create(payload("abc motors")).await.unwrap();

        let err = service.create(payload("ABC Motors")).await.unwrap_err();
        match err {
            AppError::Validation(e) => {
                assert!(e.is_conflict());
                assert_eq!(e.message(), "Ya existe una concesionaria con ese nombre");
            }
            other => panic!("se esperaba conflicto, llegó {:?}", other),
        }

        // Renombrarse a sí misma con otras mayúsculas no es conflicto
        let updated = service
            .update(&created.id, fields(json!({ "nombre": "ABC MOTORS" })))
            .await
            .unwrap();
        assert_eq!(updated.nombre, "ABC MOTORS");
        assert_eq!(repository.find_all().await.unwrap().len(), 1);
    }
}
