//! Line item handlers: create, list, get.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateLineItemRequest, LineItemListParams};
use crate::app_state::AppState;
use crate::domain::{LineItem, LineItemId};
use crate::error::{ErrorResponse, GatewayError};

/// Path of the line item details route, relative to the server root.
#[must_use]
pub fn line_item_url(id: LineItemId) -> String {
    format!("/api/v1/lineitems/{id}")
}

/// `POST /lineitems`: Create a line item.
///
/// # Errors
///
/// Returns [`GatewayError`] on an unreadable body, a field that fails
/// validation, or a full store.
#[utoipa::path(
    post,
    path = "/api/v1/lineitems",
    tag = "Line Items",
    summary = "Create a line item",
    description = "Creates a campaign with a bid, a budget, a target placement and its category and keyword labels.",
    request_body = CreateLineItemRequest,
    responses(
        (status = 201, description = "Line item created", body = LineItem,
            headers(("location" = String, description = "URL of the new line item"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn create_line_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateLineItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let spec = req.into_new_line_item()?;
    let item = state.line_items.create(spec).await?;
    let location = [(header::LOCATION, line_item_url(item.id))];
    Ok((StatusCode::CREATED, location, Json(item)))
}

/// `GET /lineitems`: List line items.
///
/// # Errors
///
/// Returns [`GatewayError`] on a malformed filter or store failure.
#[utoipa::path(
    get,
    path = "/api/v1/lineitems",
    tag = "Line Items",
    summary = "List line items",
    description = "Returns all line items in creation order, optionally filtered by advertiser and placement.",
    params(LineItemListParams),
    responses(
        (status = 200, description = "Line item list", body = Vec<LineItem>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
    )
)]
pub async fn list_line_items(
    State(state): State<AppState>,
    query: Result<Query<LineItemListParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Query(params) = query?;
    let (advertiser_id, placement) = params.validated()?;
    let items = state
        .line_items
        .list(advertiser_id.as_deref(), placement.as_deref())
        .await?;
    Ok(Json(items))
}

/// `GET /lineitems/{id}`: Get line item details.
///
/// # Errors
///
/// Returns [`GatewayError::LineItemNotFound`] if the line item does not exist
/// and [`GatewayError::InvalidRequest`] if `id` is not a UUID.
#[utoipa::path(
    get,
    path = "/api/v1/lineitems/{id}",
    tag = "Line Items",
    summary = "Get line item details",
    description = "Returns the current state of a line item, including its remaining budget and status.",
    params(
        ("id" = uuid::Uuid, Path, description = "Line item UUID"),
    ),
    responses(
        (status = 200, description = "Line item details", body = LineItem),
        (status = 400, description = "Malformed line item ID", body = ErrorResponse),
        (status = 404, description = "Line item not found", body = ErrorResponse),
    )
)]
pub async fn get_line_item(
    State(state): State<AppState>,
    path: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(id) = path?;
    let item = state.line_items.get(LineItemId::from_uuid(id)).await?;
    Ok(Json(item))
}

/// Line item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lineitems", post(create_line_item).get(list_line_items))
        .route("/lineitems/{id}", get(get_line_item))
}

