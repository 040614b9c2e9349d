//! Representación explícita de campos opcionales
//!
//! `Fields` es un mapa con solo los campos que el cliente envió. Un campo
//! ausente o con valor `null` significa "no enviado"; cualquier otro valor,
//! incluido `""`, es un campo presente que sobrescribe al actualizar.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::schema::{EntitySchema, FieldKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Valor de un campo presente (`null` cuenta como ausente)
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Valor de texto de un campo, si es string
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Conserva solo los campos del schema, descarta `null` y convierte
    /// los valores al tipo declarado cuando la conversión es segura.
    pub fn normalized(self, schema: &EntitySchema) -> Self {
        let mut out = Map::new();
        for (name, value) in self.0 {
            if value.is_null() {
                continue;
            }
            let Some(spec) = schema.field(&name) else {
                continue;
            };
            let value = match spec.kind {
                FieldKind::Text => coerce_text(value),
                FieldKind::Number => coerce_number(value),
            };
            out.insert(name, value);
        }
        Self(out)
    }

    /// Aplica los valores por defecto del schema a campos ausentes o vacíos
    pub fn with_defaults(mut self, schema: &EntitySchema) -> Self {
        for spec in schema.fields {
            let Some(default) = spec.default else {
                continue;
            };
            let blank = match self.get(spec.name) {
                None => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if blank {
                self.set(spec.name, default);
            }
        }
        self
    }

    /// Fusiona `self` (los campos enviados) sobre `base` (los campos
    /// actuales). Los campos presentes en `self` sobrescriben; el resto de
    /// `base` se conserva intacto.
    pub fn merged_over(self, mut base: Fields) -> Fields {
        for (name, value) in self.0 {
            if value.is_null() {
                continue;
            }
            base.0.insert(name, value);
        }
        base
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn coerce_text(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        other => other,
    }
}

/// Los formularios HTML envían números como texto ("15"); se aceptan si
/// parsean. Los números sin parte decimal se guardan como enteros.
fn coerce_number(value: Value) -> Value {
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
            Value::Number(Number::from(n as i64))
        }
        Some(n) => Number::from_f64(n).map(Value::Number).unwrap_or(value),
        None => value,
    }
}
