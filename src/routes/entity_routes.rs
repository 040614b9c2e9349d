use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{Entity, Fields};
use crate::services::EntityService;
use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Router CRUD para una colección:
/// `GET /`, `POST /`, `GET /:id`, `PUT /:id`, `DELETE /:id`
pub fn create_entity_router<E: Entity, S>(service: Arc<EntityService<E>>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_entities::<E>).post(create_entity::<E>))
        .route(
            "/:id",
            get(get_entity::<E>)
                .put(update_entity::<E>)
                .delete(delete_entity::<E>),
        )
        .with_state(service)
}

fn parse_id<E: Entity>(raw: &str) -> AppResult<E::Id> {
    raw.parse::<E::Id>().map_err(|_| bad_request_error("ID inválido"))
}

fn parse_body(payload: Result<Json<Fields>, JsonRejection>) -> AppResult<Fields> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))
}

async fn list_entities<E: Entity>(
    State(service): State<Arc<EntityService<E>>>,
) -> AppResult<Json<Vec<E>>> {
    let entities = service.list().await?;
    Ok(Json(entities))
}

async fn get_entity<E: Entity>(
    State(service): State<Arc<EntityService<E>>>,
    Path(id): Path<String>,
) -> AppResult<Json<E>> {
    let id = parse_id::<E>(&id)?;
    let entity = service.get_by_id(&id).await?;
    Ok(Json(entity))
}

async fn create_entity<E: Entity>(
    State(service): State<Arc<EntityService<E>>>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> AppResult<(StatusCode, Json<E>)> {
    let fields = parse_body(payload)?;
    let entity = service.create(fields).await?;
    Ok((StatusCode::CREATED, Json(entity)))
}

async fn update_entity<E: Entity>(
    State(service): State<Arc<EntityService<E>>>,
    Path(id): Path<String>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> AppResult<Json<E>> {
    let id = parse_id::<E>(&id)?;
    let fields = parse_body(payload)?;
    let entity = service.update(&id, fields).await?;
    Ok(Json(entity))
}

async fn delete_entity<E: Entity>(
    State(service): State<Arc<EntityService<E>>>,
    Path(id): Path<String>,
) -> AppResult<Json<E>> {
    let id = parse_id::<E>(&id)?;
    let entity = service.delete(&id).await?;
    Ok(Json(entity))
}
