//! REST behavior of the reference data resources through the public router builders.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use event_amplify::workflows::catalog::{
    catalog_router, Brandkey, CatalogService, ChannelGroup, InMemoryStore, Schedule,
};

fn router() -> Router {
    let brandkeys: Arc<CatalogService<Brandkey, InMemoryStore<Brandkey>>> =
        Arc::new(CatalogService::new(Arc::new(InMemoryStore::default())));
    let groups: Arc<CatalogService<ChannelGroup, InMemoryStore<ChannelGroup>>> =
        Arc::new(CatalogService::new(Arc::new(InMemoryStore::default())));
    let schedules: Arc<CatalogService<Schedule, InMemoryStore<Schedule>>> =
        Arc::new(CatalogService::new(Arc::new(InMemoryStore::default())));

    catalog_router(brandkeys)
        .merge(catalog_router(groups))
        .merge(catalog_router(schedules))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn channel_groups_round_trip_with_type_field() {
    let router = router();

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/channel-groups",
            json!({ "name": "Keynote speaker", "point": 40, "type": "ROLE" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(
            Request::get("/api/channel-groups/1")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["type"], json!("ROLE"));
    assert_eq!(payload["point"], json!(40));
}

#[tokio::test]
async fn brandkey_update_emits_update_alert() {
    let router = router();

    router
        .clone()
        .oneshot(json_request("POST", "/api/brandkeys", json!({ "name": "Topica" })))
        .await
        .expect("route executes");

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/brandkeys",
            json!({ "id": 1, "name": "Topica Native", "description": "English for adults" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-eventamplifyapp-alert")
            .and_then(|value| value.to_str().ok()),
        Some("eventAmplifyApp.brandkey.updated")
    );
    let payload = read_json(response).await;
    assert_eq!(payload["name"], json!("Topica Native"));
}

#[tokio::test]
async fn schedules_parse_rfc3339_timestamps() {
    let router = router();

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            json!({ "eventId": 1, "channelGroupId": 2, "publishAt": "2026-10-20T08:30:00Z" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json(response).await;
    assert_eq!(payload["publishAt"], json!("2026-10-20T08:30:00Z"));
}

#[tokio::test]
async fn deleting_unknown_records_is_not_found() {
    let router = router();

    let response = router
        .oneshot(
            Request::delete("/api/brandkeys/5")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get("x-eventamplifyapp-params")
            .and_then(|value| value.to_str().ok()),
        Some("brandkey")
    );
}
