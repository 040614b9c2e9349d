//! API REST de la concesionaria: autos, clientes, vendedores y
//! concesionarias sobre un servicio CRUD genérico guiado por schema.

pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
