//! Services module
//!
//! Este módulo contiene la lógica de negocio: el validador basado en schema
//! y el servicio CRUD genérico que lo usa.

pub mod entity_service;
pub mod validator;

pub use entity_service::EntityService;
pub use validator::{validate, ValidationError};
