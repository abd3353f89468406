//! API route definitions

use crate::{handlers, state::AppState};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Build the reporting API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Inpatient revenue page
        .route(
            "/api/inpatient_total_revenue/init",
            get(handlers::revenue::init),
        )
        .route(
            "/api/inpatient_total_revenue/summary",
            get(handlers::revenue::summary),
        )
        .route(
            "/api/inpatient_total_revenue/query",
            get(handlers::revenue::query),
        )
        // Per-page report endpoints
        .route("/api/drug-cost", get(handlers::drug_cost::report))
        .route(
            "/api/outpatient-appointment",
            get(handlers::appointments::report),
        )
        // Service info endpoints
        .route("/api", get(api_info))
        .route("/", get(root_endpoint))
        .layer(CompressionLayer::new())
}

/// Build health check routes (no filtering, no parameters)
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(api_routes())
        .merge(health_routes())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}

/// Root endpoint for basic connectivity
async fn root_endpoint() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "service": "Hospital Operations Reporting API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}

/// API info endpoint
async fn api_info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "api": "Hospital Operations Reporting API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "revenue_init": "/api/inpatient_total_revenue/init",
            "revenue_summary": "/api/inpatient_total_revenue/summary",
            "revenue_query": "/api/inpatient_total_revenue/query",
            "drug_cost": "/api/drug-cost",
            "outpatient_appointment": "/api/outpatient-appointment",
            "health": "/health"
        }
    }))
}
