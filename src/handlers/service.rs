// handlers/service.rs - GET / and GET /health

use axum::extract::State;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

/// GET / - service descriptor
pub async fn root() -> ApiResponse {
    ApiResponse::success(json!({
        "name": "mflix API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "movies": "/movies[/:id]",
            "theaters": "/theaters[/:id]",
            "comments": "/movies/:idMovie/comments[/:idComment]",
            "health": "/health",
        }
    }))
}

/// GET /health - 503 when the store cannot be reached
pub async fn health(State(state): State<AppState>) -> ApiResult {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => Ok(ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok",
        }))),
        Err(e) => Err(ApiError::service_unavailable("Database unavailable", e.to_string())),
    }
}
