//! Tracking handlers: record delivery events, list recorded events.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{TrackEventRequest, TrackEventResponse, TrackingListParams};
use crate::api::validation;
use crate::app_state::AppState;
use crate::domain::TrackingEvent;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /tracking`: Record an impression, click or conversion.
///
/// # Errors
///
/// Returns [`GatewayError::UnknownLineItem`] if the event references a line
/// item that does not exist, or a validation error for a malformed body.
#[utoipa::path(
    post,
    path = "/api/v1/tracking",
    tag = "Tracking",
    summary = "Track a delivery event",
    description = "Charges the referenced line item one bid and records the event. The line item becomes exhausted once its budget is no longer positive.",
    request_body = TrackEventRequest,
    responses(
        (status = 202, description = "Event accepted", body = TrackEventResponse),
        (status = 400, description = "Invalid event or unknown line item", body = ErrorResponse),
        (status = 500, description = "Unable to track event", body = ErrorResponse),
    )
)]
pub async fn track_event(
    State(state): State<AppState>,
    payload: Result<Json<TrackEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let event = req.into_event()?;
    tracing::debug!(
        event_type = %event.event_type,
        line_item_id = %event.line_item_id,
        placement = %event.placement,
        user_id = %event.user_id,
        "track event"
    );

    let line_item_id = event.line_item_id;
    state.ledger.record_event(event).await.map_err(|e| {
        if e.is_not_found() {
            GatewayError::UnknownLineItem(line_item_id)
        } else {
            e
        }
    })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(TrackEventResponse { success: true }),
    ))
}

/// `GET /tracking`: List events recorded against a line item.
///
/// # Errors
///
/// Returns [`GatewayError::LineItemNotFound`] for an unknown line item.
#[utoipa::path(
    get,
    path = "/api/v1/tracking",
    tag = "Tracking",
    summary = "List tracked events",
    description = "Returns the events recorded against a line item, oldest first.",
    params(TrackingListParams),
    responses(
        (status = 200, description = "Recorded events", body = Vec<TrackingEvent>),
        (status = 400, description = "Missing or malformed line item ID", body = ErrorResponse),
        (status = 404, description = "Line item not found", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<TrackingListParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Query(params) = query?;
    let line_item_id = validation::required("line_item_id", params.line_item_id)?;
    let events = state.ledger.events_for(line_item_id).await?;
    Ok(Json(events))
}

/// Tracking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tracking", post(track_event).get(list_events))
}
