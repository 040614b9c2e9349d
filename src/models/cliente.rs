//! Modelo de Cliente
//!
//! Clientes de la concesionaria. Se guardan en memoria y su identidad es el
//! timestamp de creación.

use serde::{Deserialize, Serialize};

use super::schema::{EntitySchema, FieldRule, FieldSpec};
use super::Entity;

pub static CLIENTE_SCHEMA: EntitySchema = EntitySchema {
    resource: "cliente",
    fields: &[
        FieldSpec::required("nombre"),
        FieldSpec::required("email").with_rule(FieldRule::Email, "El email no tiene un formato válido"),
        FieldSpec::required("telefono"),
        FieldSpec::required("direccion"),
        FieldSpec::required("ciudad"),
    ],
    missing_message: "Nombre, Email, Teléfono, Dirección y Ciudad son requeridos",
    blank_message: Some("Los campos no pueden estar vacíos o contener solo espacios"),
    not_found_message: "Cliente no encontrado",
    natural_key: None,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub direccion: String,
    pub ciudad: String,
}

impl Entity for Cliente {
    type Id = i64;

    fn schema() -> &'static EntitySchema {
        &CLIENTE_SCHEMA
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}
