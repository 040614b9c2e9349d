//! Modelo de Vendor (vendedor)

use serde::{Deserialize, Serialize};

use super::schema::{EntitySchema, FieldRule, FieldSpec, NaturalKey};
use super::Entity;

pub static VENDOR_SCHEMA: EntitySchema = EntitySchema {
    resource: "vendedor",
    fields: &[
        FieldSpec::required("name"),
        FieldSpec::required("email").with_rule(FieldRule::Email, "El email no es válido"),
        FieldSpec::required("telefono").with_rule(
            FieldRule::Phone,
            "El teléfono debe contener solo números y tener entre 7 y 15 dígitos",
        ),
        FieldSpec::required("comision")
            .number()
            .with_rule(FieldRule::Percentage, "La comisión debe ser un número entre 0 y 100"),
        FieldSpec::optional("especialidad").with_default("General"),
    ],
    missing_message: "Nombre, Email, Teléfono y Comisión son requeridos",
    blank_message: None,
    not_found_message: "Vendedor no encontrado",
    natural_key: Some(NaturalKey {
        field: "email",
        case_insensitive: false,
        conflict_message: "El email ya está registrado",
        update_conflict_message: Some("El email ya está registrado por otro vendedor"),
    }),
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub telefono: String,
    pub comision: f64,
    pub especialidad: String,
}

impl Entity for Vendor {
    type Id = i64;

    fn schema() -> &'static EntitySchema {
        &VENDOR_SCHEMA
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}
