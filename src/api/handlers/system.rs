//! System endpoints: health check, category weights.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// One configured category weight.
#[derive(Debug, Serialize, ToSchema)]
struct CategoryWeightInfo {
    category: String,
    #[schema(value_type = String)]
    weight: rust_decimal::Decimal,
}

/// `GET /config/category-weights`: List the category weights in use.
#[utoipa::path(
    get,
    path = "/config/category-weights",
    tag = "System",
    summary = "List category weights",
    description = "Returns the category affinity weights the auction scores with, sorted by category.",
    responses(
        (status = 200, description = "Category weight table", body = Vec<CategoryWeightInfo>),
    )
)]
pub async fn category_weights_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut weights: Vec<CategoryWeightInfo> = state
        .auction
        .weights()
        .iter()
        .map(|(category, weight)| CategoryWeightInfo {
            category: category.to_string(),
            weight,
        })
        .collect();
    weights.sort_by(|a, b| a.category.cmp(&b.category));
    (StatusCode::OK, Json(weights))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/category-weights", get(category_weights_handler))
}
