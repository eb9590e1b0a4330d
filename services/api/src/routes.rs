use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use lifeline::alerting::{alerting_router, ContactDirectory, SafetyService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_safety_routes<D>(service: Arc<SafetyService<D>>) -> axum::Router
where
    D: ContactDirectory + 'static,
{
    alerting_router(service)
        .route("/", axum::routing::get(home))
        .route(
            "/api/test",
            axum::routing::get(test_connection).post(test_connection),
        )
        .route("/api/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Personal Safety Analytics API is running",
        "status": "active",
    }))
}

pub(crate) async fn test_connection(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "Backend connected successfully",
        "port": state.port,
        "cors": "enabled",
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "endpoints": ["/api/threat-detection", "/api/emergency-alert"],
    }))
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
