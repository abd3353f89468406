//! Health check endpoints for monitoring and diagnostics

use crate::dataset::DatasetStats;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Reporting dataset statistics
    pub dataset: DatasetStats,
    /// System uptime in seconds
    pub uptime_seconds: u64,
}

/// Readiness check response (simpler than health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Service readiness status
    pub ready: bool,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Basic health check endpoint for monitoring systems
///
/// Reports service version, uptime and the size of the reporting dataset.
/// Returns HTTP 503 when the dataset holds no revenue rows, since every
/// reporting endpoint would be empty.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let stats = state.dataset.stats();

    if stats.revenue_rows == 0 {
        error!("Health check failed: reporting dataset is empty");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        dataset: stats,
        uptime_seconds: state.uptime_seconds(),
    };

    info!("Health check completed");
    Ok(Json(response))
}

/// Readiness check endpoint for orchestrator-style probes
///
/// Returns 200 OK once the dataset is loaded and the service can answer.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        ready: state.dataset.stats().revenue_rows > 0,
        timestamp: chrono::Utc::now(),
    })
}
