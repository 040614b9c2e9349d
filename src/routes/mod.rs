//! Rutas HTTP
//!
//! Cada colección se monta bajo `/api/<recurso>` con el mismo router CRUD.

pub mod entity_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

pub use entity_routes::create_entity_router;

/// Crear el router principal de la API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/clientes", create_entity_router(state.clientes.clone()))
        .nest("/api/vendedores", create_entity_router(state.vendedores.clone()))
        .nest("/api/concesionarias", create_entity_router(state.concesionarias.clone()))
        .nest("/api/autos", create_entity_router(state.autos.clone()))
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "message": "API de Concesionaria funcionando correctamente",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
