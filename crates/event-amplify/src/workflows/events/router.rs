use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::classification::ClassificationError;
use super::domain::{Event, EventStatus};
use super::service::{EventService, EventServiceError};
use crate::workflows::catalog::domain::EntityId;
use crate::workflows::catalog::headers::{
    entity_creation_alert, entity_deletion_alert, entity_update_alert, failure_alert,
    total_count, with_location,
};
use crate::workflows::catalog::repository::{
    ChannelGroupLookup, Entity, EntityRepository, RepositoryError,
};

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: EventStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectSearchQuery {
    pub product_code: String,
}

/// Router builder exposing event CRUD, classification and search endpoints.
pub fn event_router<R, L>(service: Arc<EventService<R, L>>) -> Router
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    Router::new()
        .route(
            "/api/events",
            post(create_handler::<R, L>)
                .put(update_handler::<R, L>)
                .get(list_handler::<R, L>),
        )
        .route(
            "/api/events/:id",
            get(get_handler::<R, L>).delete(cancel_handler::<R, L>),
        )
        .route("/api/events/:id/classify", post(classify_handler::<R, L>))
        .route("/api/events/:id/status", put(status_handler::<R, L>))
        .route("/api/classify/events", post(preview_handler::<R, L>))
        .route(
            "/api/_search/events/inject",
            get(inject_search_handler::<R, L>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Json(event): Json<Event>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.create(event) {
        Ok(created) => created_response(created),
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn update_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Json(event): Json<Event>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    let creating = event.id.is_none();
    match service.update(event) {
        Ok(stored) if creating => created_response(stored),
        Ok(stored) => updated_response(stored),
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn list_handler<R, L>(State(service): State<Arc<EventService<R, L>>>) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.list() {
        Ok(events) => (StatusCode::OK, total_count(events.len()), Json(events)).into_response(),
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn get_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.get(EntityId(id)) {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn cancel_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.cancel(EntityId(id)) {
        Ok(_) => {
            let headers = entity_deletion_alert(Event::ENTITY_NAME, &id.to_string());
            (StatusCode::OK, headers).into_response()
        }
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn classify_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.classify(EntityId(id)) {
        Ok(event) => updated_response(event),
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn status_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Path(id): Path<u64>,
    Json(request): Json<StatusUpdateRequest>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.update_status(EntityId(id), request.status) {
        Ok(event) => updated_response(event),
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn preview_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Json(event): Json<Event>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.preview(event) {
        Ok(classified) => (StatusCode::OK, Json(classified)).into_response(),
        Err(error) => event_error_response(error),
    }
}

pub(crate) async fn inject_search_handler<R, L>(
    State(service): State<Arc<EventService<R, L>>>,
    Query(query): Query<InjectSearchQuery>,
) -> Response
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    match service.find_inject_by_product_code(&query.product_code) {
        Ok(Some(event)) => (StatusCode::OK, Json(event)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("no inject event for product {}", query.product_code),
            });
            (
                StatusCode::NOT_FOUND,
                failure_alert(Event::ENTITY_NAME, "notfound"),
                Json(payload),
            )
                .into_response()
        }
        Err(error) => event_error_response(error),
    }
}

fn created_response(event: Event) -> Response {
    let id = event.id.map(|id| id.to_string()).unwrap_or_default();
    let headers = with_location(
        entity_creation_alert(Event::ENTITY_NAME, &id),
        &format!("/api/events/{id}"),
    );
    (StatusCode::CREATED, headers, Json(event)).into_response()
}

fn updated_response(event: Event) -> Response {
    let id = event.id.map(|id| id.to_string()).unwrap_or_default();
    let headers = entity_update_alert(Event::ENTITY_NAME, &id);
    (StatusCode::OK, headers, Json(event)).into_response()
}

pub(crate) fn event_error_response(error: EventServiceError) -> Response {
    let (status, key) = match &error {
        EventServiceError::IdExists => (StatusCode::BAD_REQUEST, "idexists"),
        EventServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "notfound"),
        EventServiceError::Classification(ClassificationError::MissingQuestion) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "noquestion")
        }
        EventServiceError::Classification(ClassificationError::ChannelGroupNotFound {
            ..
        }) => (StatusCode::UNPROCESSABLE_ENTITY, "channelgroupnotfound"),
        EventServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "conflict")
        }
        EventServiceError::Classification(ClassificationError::Lookup(_))
        | EventServiceError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    let payload = json!({ "error": error.to_string() });
    (status, failure_alert(Event::ENTITY_NAME, key), Json(payload)).into_response()
}
