//! Winning ad handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use super::line_item::line_item_url;
use crate::api::dto::AdQueryParams;
use crate::app_state::AppState;
use crate::domain::Ad;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /ads`: Rank winning ads for a placement query.
///
/// # Errors
///
/// Returns [`GatewayError`] on a malformed query or store failure.
#[utoipa::path(
    get,
    path = "/api/v1/ads",
    tag = "Ads",
    summary = "Get winning ads",
    description = "Matches active line items on placement, category and keyword, drops those that cannot afford their bid, and returns the rest ordered by descending score. Each ad links to its line item details.",
    params(AdQueryParams),
    responses(
        (status = 200, description = "Ranked winning ads", body = Vec<Ad>),
        (status = 204, description = "No line item won"),
        (status = 400, description = "Invalid query", body = ErrorResponse),
    )
)]
pub async fn get_winning_ads(
    State(state): State<AppState>,
    query: Result<Query<AdQueryParams>, QueryRejection>,
) -> Result<Response, GatewayError> {
    let Query(params) = query?;
    let query = params.validated()?;
    tracing::debug!(
        placement = %query.placement,
        category = %query.category,
        keyword = %query.keyword,
        "fetching winning ads"
    );

    let mut ads = state
        .auction
        .rank(&query.placement, &query.category, &query.keyword)
        .await?;

    if ads.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    for ad in &mut ads {
        ad.serve_url = line_item_url(ad.id);
    }
    Ok(Json(ads).into_response())
}

/// Ad routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ads", get(get_winning_ads))
}
