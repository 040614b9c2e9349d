//! Modelo de Concesionaria
//!
//! Mapea a la tabla `concesionarias`. La identidad la asigna el almacén
//! (`gen_random_uuid()` en PostgreSQL, `Uuid::new_v4` en memoria).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::schema::{EntitySchema, FieldSpec, NaturalKey};
use super::Entity;

pub static CONCESIONARIA_SCHEMA: EntitySchema = EntitySchema {
    resource: "concesionaria",
    fields: &[
        FieldSpec::required("nombre"),
        FieldSpec::required("direccion"),
        FieldSpec::required("telefono"),
        FieldSpec::required("ciudad"),
        FieldSpec::required("gerente"),
    ],
    missing_message: "Nombre, Dirección, Teléfono, Ciudad y Gerente son requeridos",
    blank_message: None,
    not_found_message: "Concesionaria no encontrada",
    natural_key: Some(NaturalKey {
        field: "nombre",
        case_insensitive: true,
        conflict_message: "Ya existe una concesionaria con ese nombre",
        update_conflict_message: None,
    }),
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Concesionaria {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub ciudad: String,
    pub gerente: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Entity for Concesionaria {
    type Id = Uuid;

    fn schema() -> &'static EntitySchema {
        &CONCESIONARIA_SCHEMA
    }

    fn id(&self) -> &Uuid {
        &self.id
    }
}
