//! REST API layer: route handlers, DTOs, validation and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; system endpoints and the
//! OpenAPI document sit at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;
pub mod validation;

use axum::Router;
#[cfg(not(feature = "swagger-ui"))]
use axum::{Json, routing::get};
use utoipa::OpenApi;

use crate::app_state::AppState;
use openapi::ApiDoc;

/// Path the OpenAPI JSON document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = {
        let doc = ApiDoc::openapi();
        router.route(OPENAPI_PATH, get(move || async move { Json(doc) }))
    };

    router
}
