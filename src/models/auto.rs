//! Modelo de Auto

use serde::{Deserialize, Serialize};

use super::schema::{EntitySchema, FieldRule, FieldSpec};
use super::Entity;

pub static AUTO_SCHEMA: EntitySchema = EntitySchema {
    resource: "auto",
    fields: &[
        FieldSpec::required("marca"),
        FieldSpec::required("modelo"),
        FieldSpec::required("año")
            .number()
            .with_rule(FieldRule::Year, "El año debe ser un número entero válido"),
        FieldSpec::required("color"),
        FieldSpec::required("numeroSerie"),
    ],
    missing_message: "Marca, Modelo, Año, Color y Número de Serie son requeridos",
    blank_message: None,
    not_found_message: "Auto no encontrado",
    natural_key: None,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auto {
    pub id: i64,
    pub marca: String,
    pub modelo: String,
    #[serde(rename = "año")]
    pub anio: i32,
    pub color: String,
    #[serde(rename = "numeroSerie")]
    pub numero_serie: String,
}

impl Entity for Auto {
    type Id = i64;

    fn schema() -> &'static EntitySchema {
        &AUTO_SCHEMA
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}
