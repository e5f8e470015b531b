//! Health check endpoint for service monitoring.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Crate version of the running binary
    pub version: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// Does not contact the provider; a healthy response only means the process
/// is serving requests.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
