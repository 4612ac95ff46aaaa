use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::catalog::domain::EntityId;
use crate::workflows::catalog::repository::EntityRepository;
use crate::workflows::events::router::{cancel_handler, get_handler};
use crate::workflows::events::{event_router, EventService};

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn event_payload(role_id: u64) -> Value {
    json!({
        "name": "Topica graduation day",
        "question": {
            "roleId": role_id,
            "inviteeId": INVITEE_ID.0,
            "scaleId": SCALE_ID.0,
            "amplifyType": "SPONSOR"
        }
    })
}

#[tokio::test]
async fn preview_route_classifies_json_payloads() {
    let (service, _, _) = build_service(40, 40, 30);
    let router = event_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/classify/events",
            event_payload(ROLE_ID.0),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eventLevel"], json!("E1"));
    assert_eq!(payload["eventStatus"], json!("COORDINATE"));
    assert_eq!(payload["amplifyType"], json!("SPONSOR"));
    assert_eq!(payload["priorityGroup"], json!(["K0A", "K0B"]));
    assert_eq!(payload["products"], json!([]));
}

#[tokio::test]
async fn preview_route_reports_missing_channel_groups() {
    let (service, _, _) = build_service(40, 40, 30);
    let router = event_router(Arc::new(service));

    let response = router
        .oneshot(json_request("POST", "/api/classify/events", event_payload(999)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response
            .headers()
            .get("x-eventamplifyapp-error")
            .and_then(|value| value.to_str().ok()),
        Some("error.channelgroupnotfound")
    );
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("role channel group 999 not found"));
}

#[tokio::test]
async fn create_then_classify_through_the_router() {
    let (service, _, _) = build_service(10, 10, 5);
    let router = event_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/events", event_payload(ROLE_ID.0)))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/api/events/1")
    );

    let response = router
        .oneshot(
            Request::post("/api/events/1/classify")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eventLevel"], json!("E4"));
    assert_eq!(payload["eventStatus"], json!("INVALID"));
}

#[tokio::test]
async fn delete_cancels_instead_of_removing() {
    let (service, events, _) = build_service(40, 40, 30);
    let service = Arc::new(service);
    let created = service.create(event()).expect("create succeeds");
    let id = created.id.expect("id assigned");

    let response =
        cancel_handler::<EventStore, ChannelGroupStore>(State(service.clone()), Path(id.0)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_handler::<EventStore, ChannelGroupStore>(State(service), Path(id.0)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eventStatus"], json!("CANCEL"));
    assert_eq!(events.list().expect("list").len(), 1);
}

#[tokio::test]
async fn status_route_accepts_explicit_status() {
    let (service, _, _) = build_service(40, 40, 30);
    let service = Arc::new(service);
    service.create(event()).expect("create succeeds");
    let router = event_router(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/events/1/status",
            json!({ "status": "CANCEL" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eventStatus"], json!("CANCEL"));
}

#[tokio::test]
async fn get_route_returns_not_found_for_unknown_events() {
    let (service, _, _) = build_service(40, 40, 30);
    let router = event_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/events/42")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inject_search_route_returns_not_found_without_match() {
    let events = Arc::new(EventStore::default());
    let service = EventService::new(events, channel_groups(40, 40, 30));
    let router = event_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/_search/events/inject?productCode=TOPICA-NATIVE")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_route_rejects_ids() {
    let (service, _, _) = build_service(40, 40, 30);
    let router = event_router(Arc::new(service));
    let mut payload = event_payload(ROLE_ID.0);
    payload["id"] = json!(EntityId(3).0);

    let response = router
        .oneshot(json_request("POST", "/api/events", payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
