//! Validador genérico de entidades
//!
//! Recorre el schema de la entidad en tres pasos (presencia, formato,
//! unicidad) y devuelve el primer error encontrado como valor. Nunca
//! modifica el candidato ni las entidades existentes.

use serde_json::Value;
use thiserror::Error;

use crate::models::{Entity, EntitySchema, FieldKind, FieldRule, FieldSpec, Fields};
use crate::utils::validation::{
    validate_email, validate_integer, validate_not_empty, validate_phone, validate_range,
};

const MIN_YEAR: f64 = 1886.0;
const MAX_YEAR: f64 = 2100.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    MissingFields(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    Conflict(String),
}

impl ValidationError {
    pub fn message(&self) -> &str {
        match self {
            ValidationError::MissingFields(msg)
            | ValidationError::InvalidFormat(msg)
            | ValidationError::Conflict(msg) => msg,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ValidationError::Conflict(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "MISSING_FIELDS",
            ValidationError::InvalidFormat(_) => "INVALID_FORMAT",
            ValidationError::Conflict(_) => "CONFLICT",
        }
    }
}

/// Valida un candidato contra el schema de `E`.
///
/// `existing` son las entidades contra las que se revisa la clave natural;
/// la que tenga identidad `exclude_id` se ignora (es la que se actualiza).
pub fn validate<E: Entity>(
    candidate: &Fields,
    existing: &[E],
    exclude_id: Option<&E::Id>,
) -> Result<(), ValidationError> {
    let schema = E::schema();
    check_presence(schema, candidate)?;
    check_format(schema, candidate)?;
    check_uniqueness(schema, candidate, existing, exclude_id)
}

fn check_presence(schema: &EntitySchema, candidate: &Fields) -> Result<(), ValidationError> {
    let required = schema.fields.iter().filter(|f| f.required);

    if required.clone().any(|f| !candidate.is_present(f.name)) {
        return Err(ValidationError::MissingFields(schema.missing_message.to_string()));
    }

    let blank = required.into_iter().any(|f| match candidate.get(f.name) {
        Some(Value::String(s)) => validate_not_empty(s).is_err(),
        _ => false,
    });
    if blank {
        let message = schema.blank_message.unwrap_or(schema.missing_message);
        return Err(ValidationError::MissingFields(message.to_string()));
    }

    Ok(())
}

fn check_format(schema: &EntitySchema, candidate: &Fields) -> Result<(), ValidationError> {
    for spec in schema.fields {
        let Some(value) = candidate.get(spec.name) else {
            continue;
        };
        check_field(spec, value)?;
    }
    Ok(())
}

fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    let invalid = |fallback: String| {
        let message = spec.rule.map(|(_, msg)| msg.to_string()).unwrap_or(fallback);
        ValidationError::InvalidFormat(message)
    };

    match spec.kind {
        FieldKind::Text => {
            let Some(text) = value.as_str() else {
                return Err(invalid(format!("El campo '{}' debe ser texto", spec.name)));
            };
            let ok = match spec.rule {
                Some((FieldRule::Email, _)) => validate_email(text).is_ok(),
                Some((FieldRule::Phone, _)) => validate_phone(text).is_ok(),
                _ => true,
            };
            if !ok {
                return Err(invalid(format!("El campo '{}' no tiene un formato válido", spec.name)));
            }
        }
        FieldKind::Number => {
            let Some(number) = value.as_f64() else {
                return Err(invalid(format!("El campo '{}' debe ser un número", spec.name)));
            };
            let ok = match spec.rule {
                Some((FieldRule::Percentage, _)) => validate_range(number, 0.0, 100.0).is_ok(),
                Some((FieldRule::Year, _)) => {
                    validate_integer(number).is_ok() && validate_range(number, MIN_YEAR, MAX_YEAR).is_ok()
                }
                _ => number.is_finite(),
            };
            if !ok {
                return Err(invalid(format!("El campo '{}' está fuera de rango", spec.name)));
            }
        }
    }

    Ok(())
}

fn check_uniqueness<E: Entity>(
    schema: &EntitySchema,
    candidate: &Fields,
    existing: &[E],
    exclude_id: Option<&E::Id>,
) -> Result<(), ValidationError> {
    let Some(key) = schema.natural_key else {
        return Ok(());
    };
    let Some(value) = candidate.text(key.field) else {
        return Ok(());
    };

    let taken = existing
        .iter()
        .filter(|other| exclude_id != Some(other.id()))
        .any(|other| key.matches(other.to_fields().text(key.field), value));

    if taken {
        return Err(ValidationError::Conflict(
            key.conflict_message(exclude_id.is_some()).to_string(),
        ));
    }
    Ok(())
}
