use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::EntityId;
use super::headers::{
    entity_creation_alert, entity_deletion_alert, entity_update_alert, failure_alert,
    total_count, with_location,
};
use super::repository::{Entity, EntityRepository, RepositoryError};
use super::service::{CatalogError, CatalogService};

/// Router exposing the REST resource for one entity under `/api/<collection>`.
pub fn catalog_router<E, R>(service: Arc<CatalogService<E, R>>) -> Router
where
    E: Entity,
    R: EntityRepository<E> + 'static,
{
    let collection = format!("/api/{}", E::COLLECTION);
    let item = format!("/api/{}/:id", E::COLLECTION);

    Router::new()
        .route(
            &collection,
            post(create_handler::<E, R>)
                .put(update_handler::<E, R>)
                .get(list_handler::<E, R>),
        )
        .route(
            &item,
            get(get_handler::<E, R>).delete(delete_handler::<E, R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<E, R>(
    State(service): State<Arc<CatalogService<E, R>>>,
    Json(entity): Json<E>,
) -> Response
where
    E: Entity,
    R: EntityRepository<E> + 'static,
{
    match service.create(entity) {
        Ok(created) => {
            let id = created.id().map(|id| id.to_string()).unwrap_or_default();
            let headers = with_location(
                entity_creation_alert(E::ENTITY_NAME, &id),
                &format!("/api/{}/{}", E::COLLECTION, id),
            );
            (StatusCode::CREATED, headers, Json(created)).into_response()
        }
        Err(error) => catalog_error_response(E::ENTITY_NAME, error),
    }
}

pub(crate) async fn update_handler<E, R>(
    State(service): State<Arc<CatalogService<E, R>>>,
    Json(entity): Json<E>,
) -> Response
where
    E: Entity,
    R: EntityRepository<E> + 'static,
{
    let created = entity.id().is_none();
    match service.update(entity) {
        Ok(stored) => {
            let id = stored.id().map(|id| id.to_string()).unwrap_or_default();
            if created {
                let headers = with_location(
                    entity_creation_alert(E::ENTITY_NAME, &id),
                    &format!("/api/{}/{}", E::COLLECTION, id),
                );
                (StatusCode::CREATED, headers, Json(stored)).into_response()
            } else {
                let headers = entity_update_alert(E::ENTITY_NAME, &id);
                (StatusCode::OK, headers, Json(stored)).into_response()
            }
        }
        Err(error) => catalog_error_response(E::ENTITY_NAME, error),
    }
}

pub(crate) async fn list_handler<E, R>(
    State(service): State<Arc<CatalogService<E, R>>>,
) -> Response
where
    E: Entity,
    R: EntityRepository<E> + 'static,
{
    match service.list() {
        Ok(entities) => {
            (StatusCode::OK, total_count(entities.len()), Json(entities)).into_response()
        }
        Err(error) => catalog_error_response(E::ENTITY_NAME, error),
    }
}

pub(crate) async fn get_handler<E, R>(
    State(service): State<Arc<CatalogService<E, R>>>,
    Path(id): Path<u64>,
) -> Response
where
    E: Entity,
    R: EntityRepository<E> + 'static,
{
    match service.get(EntityId(id)) {
        Ok(entity) => (StatusCode::OK, Json(entity)).into_response(),
        Err(error) => catalog_error_response(E::ENTITY_NAME, error),
    }
}

pub(crate) async fn delete_handler<E, R>(
    State(service): State<Arc<CatalogService<E, R>>>,
    Path(id): Path<u64>,
) -> Response
where
    E: Entity,
    R: EntityRepository<E> + 'static,
{
    match service.delete(EntityId(id)) {
        Ok(()) => {
            let headers = entity_deletion_alert(E::ENTITY_NAME, &id.to_string());
            (StatusCode::OK, headers).into_response()
        }
        Err(error) => catalog_error_response(E::ENTITY_NAME, error),
    }
}

pub(crate) fn catalog_error_response(entity_name: &str, error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::IdExists => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CatalogError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let headers = failure_alert(entity_name, error.error_key());
    let payload = json!({ "error": error.to_string() });
    (status, headers, Json(payload)).into_response()
}
