//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use greenhouse_api::state::AppState;
use greenhouse_test_support::{CallLog, FixedClock, RecordingEventBus};
use http_body_util::BodyExt;
use tower_http::cors::CorsLayer;
use tower::ServiceExt;
use uuid::Uuid;

/// A router over fresh in-memory storage plus handles for assertions.
pub struct TestApp {
    pub router: Router,
    pub bus: Arc<RecordingEventBus>,
    pub tenant_id: Uuid,
}

impl TestApp {
    /// Router clone for a single `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full app router over in-memory repositories with a fixed
/// clock and a recording event bus. Uses the same route structure as
/// `main.rs`.
pub fn build_test_app() -> TestApp {
    build_test_app_with_cors(CorsLayer::permissive())
}

/// Like [`build_test_app`], behind a specific CORS policy.
pub fn build_test_app_with_cors(cors: CorsLayer) -> TestApp {
    let bus = Arc::new(RecordingEventBus::new(CallLog::new()));
    let state = AppState::in_memory(Arc::new(FixedClock::default()), bus.clone());
    TestApp {
        router: greenhouse_api::build_router(state, cors),
        bus,
        tenant_id: Uuid::new_v4(),
    }
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    tenant_id: Option<Uuid>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tenant_id) = tenant_id {
        builder = builder.header("x-tenant-id", tenant_id.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    tenant_id: Uuid,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(tenant_id), Some(body)).await
}

/// Send a PATCH request with a JSON body and return the response.
pub async fn patch_json(
    app: Router,
    uri: &str,
    tenant_id: Uuid,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PATCH", uri, Some(tenant_id), Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str, tenant_id: Uuid) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, Some(tenant_id), None).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: Router, uri: &str, tenant_id: Uuid) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, Some(tenant_id), None).await
}

/// Send a GET request without a tenant header.
pub async fn get_anonymous(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None, None).await
}
