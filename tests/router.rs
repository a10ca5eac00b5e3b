mod common;

use axum::{
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::net::SocketAddr;
use tower::ServiceExt;

use car_rental::routes::app_router;

fn request(method: &str, uri: &str, peer: [u8; 4]) -> Request<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((peer, 40_000))));
    req
}

#[tokio::test]
async fn test_app_router_serves_root_and_trailing_slash() {
    let (state, store) = common::create_memory_state();
    store.lock().unwrap().seed_car("Avanza", "Small", false);
    let app = app_router(state, false);

    let response = app.clone().oneshot(request("GET", "/", [10, 0, 0, 1])).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("GET", "/v1/cars/", [10, 0, 0, 1]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["meta"]["pagination"]["count"], 1);
}

#[tokio::test]
async fn test_app_router_rate_limits_secured_routes_per_ip() {
    let (state, _store) = common::create_memory_state();
    let app = app_router(state, false);

    let mut statuses = Vec::new();
    for _ in 0..11 {
        let response = app
            .clone()
            .oneshot(request("GET", "/v1/auth/whoami", [10, 0, 0, 2]))
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert!(statuses[..10].iter().all(|s| *s == StatusCode::UNAUTHORIZED));
    assert_eq!(statuses[10], StatusCode::TOO_MANY_REQUESTS);

    // Another client still has its own bucket.
    let response = app
        .oneshot(request("GET", "/v1/auth/whoami", [10, 0, 0, 3]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_app_router_fallback() {
    let (state, _store) = common::create_memory_state();
    let app = app_router(state, false);

    let response = app
        .oneshot(request("DELETE", "/nowhere", [10, 0, 0, 4]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["details"]["method"], "DELETE");
    assert_eq!(json["error"]["details"]["url"], "/nowhere");
}
