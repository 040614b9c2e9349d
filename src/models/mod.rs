//! Modelos del sistema
//!
//! Este módulo contiene las entidades de la concesionaria y el trait
//! `Entity` que las conecta con el validador, los repositorios y el
//! servicio CRUD genérico.

pub mod auto;
pub mod cliente;
pub mod concesionaria;
pub mod fields;
pub mod schema;
pub mod vendor;

pub use auto::Auto;
pub use cliente::Cliente;
pub use concesionaria::Concesionaria;
pub use fields::Fields;
pub use schema::{EntitySchema, FieldKind, FieldRule, FieldSpec, NaturalKey};
pub use vendor::Vendor;

use std::fmt::{Debug, Display};
use std::str::FromStr;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identidad de una entidad. Se asigna al crear y nunca cambia.
pub trait EntityId:
    Clone + PartialEq + Debug + Display + FromStr + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Genera una identidad nueva dado el último valor emitido por la colección
    fn generate(last: Option<&Self>) -> Self;
}

/// Timestamp de creación en milisegundos, estrictamente creciente
impl EntityId for i64 {
    fn generate(last: Option<&Self>) -> Self {
        let now = Utc::now().timestamp_millis();
        match last {
            Some(&last) if now <= last => last + 1,
            _ => now,
        }
    }
}

impl EntityId for Uuid {
    fn generate(_last: Option<&Self>) -> Self {
        Uuid::new_v4()
    }
}

/// Entidad de negocio administrada por el servicio CRUD
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: EntityId;

    fn schema() -> &'static EntitySchema;

    fn id(&self) -> &Self::Id;

    /// Campos de la entidad sin la identidad
    fn to_fields(&self) -> Fields {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => {
                map.remove("id");
                Fields::from(map)
            }
            _ => Fields::new(),
        }
    }

    /// Construye la entidad tipada a partir de campos ya validados
    fn from_fields(id: Self::Id, fields: Fields) -> Result<Self, serde_json::Error> {
        let mut value = fields.into_value();
        if let Value::Object(map) = &mut value {
            map.insert("id".to_string(), serde_json::to_value(&id)?);
        }
        serde_json::from_value(value)
    }
}
