//! Schema declarativo de entidades
//!
//! Cada entidad describe sus campos, cuáles son requeridos, las reglas de
//! formato y su clave natural. El validador trabaja únicamente sobre esta
//! descripción, así que agregar una entidad no requiere escribir validación.

/// Tipo de valor esperado para un campo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// Regla de formato aplicada a un campo presente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// `local@dominio.tld`
    Email,
    /// Solo dígitos, entre 7 y 15
    Phone,
    /// Número entre 0 y 100
    Percentage,
    /// Año entero razonable
    Year,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Regla de formato y mensaje a devolver si falla
    pub rule: Option<(FieldRule, &'static str)>,
    /// Valor usado al crear cuando el campo no llega o llega vacío
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: true,
            rule: None,
            default: None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: false,
            rule: None,
            default: None,
        }
    }

    pub const fn number(self) -> Self {
        Self {
            name: self.name,
            kind: FieldKind::Number,
            required: self.required,
            rule: self.rule,
            default: self.default,
        }
    }

    pub const fn with_rule(self, rule: FieldRule, message: &'static str) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            required: self.required,
            rule: Some((rule, message)),
            default: self.default,
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            required: self.required,
            rule: self.rule,
            default: Some(default),
        }
    }
}

/// Campo que debe ser único entre todas las entidades de una colección
#[derive(Debug, Clone, Copy)]
pub struct NaturalKey {
    pub field: &'static str,
    pub case_insensitive: bool,
    pub conflict_message: &'static str,
    /// Mensaje al chocar durante una actualización; si es `None` se usa
    /// `conflict_message`.
    pub update_conflict_message: Option<&'static str>,
}

impl NaturalKey {
    /// Forma canónica del valor para comparar. Es la misma clave que se
    /// guarda en la base de datos, así memoria y Postgres no dependen de la
    /// collation para decidir qué nombres chocan.
    pub fn fold(&self, value: &str) -> String {
        if self.case_insensitive {
            value.to_lowercase()
        } else {
            value.to_string()
        }
    }

    /// Compara un valor almacenado contra el candidato
    pub fn matches(&self, stored: Option<&str>, candidate: &str) -> bool {
        match stored {
            Some(stored) => self.fold(stored) == self.fold(candidate),
            None => false,
        }
    }

    pub fn conflict_message(&self, updating: bool) -> &'static str {
        match self.update_conflict_message {
            Some(message) if updating => message,
            _ => self.conflict_message,
        }
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    /// Nombre del recurso para logs
    pub resource: &'static str,
    pub fields: &'static [FieldSpec],
    /// Mensaje cuando falta algún campo requerido
    pub missing_message: &'static str,
    /// Mensaje cuando un campo requerido llega vacío o con solo espacios.
    /// Si es `None` se usa `missing_message`.
    pub blank_message: Option<&'static str>,
    pub not_found_message: &'static str,
    pub natural_key: Option<NaturalKey>,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
