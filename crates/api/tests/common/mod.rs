#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mxqc_api::config::ServerConfig;
use mxqc_api::router::build_app_router;
use mxqc_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        json_logs: false,
    }
}

/// Build the full application router, with the production middleware
/// stack, over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState { pool }, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Payload fixtures
// ---------------------------------------------------------------------------

pub fn machine_json(hospital: &str, tech: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "hospital": hospital,
        "room": "Ward 3",
        "model": "MobileDR 300",
        "serial": "SN-01",
        "tube_serial": "TB-01",
        "detector_serial": "DT-01",
        "tech_name": tech,
        "session_date": date,
    })
}

/// A complete data-entry form where every test passes with default limits.
pub fn passing_session(hospital: &str) -> serde_json::Value {
    serde_json::json!({
        "machine": machine_json(hospital, "A. Chen", "2024-06-01"),
        "kv": { "nominal_kv": 80, "readings": [80.1, "79.8", 80.3] },
        "repeatability": { "nominal_mas": 2, "readings": [10.0, 10.2, 9.9] },
        "linearity": [
            { "mas": 1, "dose": 10.1 },
            { "mas": 2, "dose": 19.9 },
            { "mas": 3, "dose": 30.2 },
            { "mas": 4, "dose": 39.8 },
        ],
    })
}
