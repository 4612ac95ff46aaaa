use crate::infra::{AppState, Stores};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use event_amplify::error::AppError;
use event_amplify::workflows::catalog::{catalog_router, CatalogService, Entity, InMemoryStore};
use event_amplify::workflows::events::{event_router, EventService};
use event_amplify::workflows::seed::ChannelGroupImporter;
use serde::Serialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct ImportResponse {
    pub(crate) imported: usize,
}

fn resource<E: Entity>(store: &Arc<InMemoryStore<E>>) -> Router {
    catalog_router(Arc::new(CatalogService::new(store.clone())))
}

/// Every REST resource plus the operational endpoints.
pub(crate) fn api_router(stores: &Stores) -> Router {
    let events = Arc::new(EventService::new(
        stores.events.clone(),
        stores.channel_groups.clone(),
    ));

    Router::new()
        .merge(resource(&stores.channel_groups))
        .merge(resource(&stores.questions))
        .merge(resource(&stores.products))
        .merge(resource(&stores.brandkeys))
        .merge(resource(&stores.brandkey_products))
        .merge(resource(&stores.schedules))
        .merge(resource(&stores.articles))
        .merge(event_router(events))
        .route(
            "/api/_import/channel-groups",
            post(import_channel_groups_endpoint),
        )
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Load channel groups posted as a CSV body into the shared store.
pub(crate) async fn import_channel_groups_endpoint(
    Extension(stores): Extension<Stores>,
    body: String,
) -> Result<(StatusCode, Json<ImportResponse>), AppError> {
    let imported =
        ChannelGroupImporter::import_into(Cursor::new(body), stores.channel_groups.as_ref())?;
    Ok((StatusCode::CREATED, Json(ImportResponse { imported })))
}
