//! Health check handlers.

use axum::Json;
use serde::Serialize;

/// Banner returned from the service root.
pub const BANNER: &str = "Indian Railways IVR API is running successfully!";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Root banner response.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    /// Human-readable banner.
    pub message: String,
    /// Service version.
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "ivr".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Service root.
pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: BANNER.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
