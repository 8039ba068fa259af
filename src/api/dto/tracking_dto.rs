//! Tracking event DTOs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::validation;
use crate::domain::{LineItemId, TrackingEvent, TrackingEventType};
use crate::error::GatewayError;

/// Request body for `POST /tracking`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct TrackEventRequest {
    /// `impression`, `click` or `conversion`.
    pub event_type: Option<String>,
    /// Line item the event is charged to.
    pub line_item_id: Option<String>,
    /// When the event happened (RFC 3339).
    pub timestamp: Option<DateTime<Utc>>,
    /// Slot the ad was served in.
    pub placement: Option<String>,
    /// End user the ad was served to (2–30 chars).
    pub user_id: Option<String>,
    /// Free-form client metadata.
    pub metadata: Option<HashMap<String, String>>,
}

impl TrackEventRequest {
    /// Validates every field and builds the domain event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ValidationFailed`] for the first bad field.
    pub fn into_event(self) -> Result<TrackingEvent, GatewayError> {
        let raw_type = validation::required_str("event_type", self.event_type)?;
        let event_type = parse_event_type(&raw_type)?;

        let raw_id = validation::required_str("line_item_id", self.line_item_id)?;
        let line_item_id: LineItemId =
            raw_id.parse().map_err(|_| GatewayError::ValidationFailed {
                field: "line_item_id",
                reason: "must be a valid UUID".to_string(),
            })?;

        let timestamp = validation::required("timestamp", self.timestamp)?;

        let placement = validation::required_str("placement", self.placement)?;
        validation::label("placement", &placement)?;

        let user_id = validation::required_str("user_id", self.user_id)?;
        validation::user_id(&user_id)?;

        let metadata = validation::required("metadata", self.metadata)?;

        Ok(TrackingEvent {
            event_type,
            line_item_id,
            timestamp,
            placement,
            user_id,
            metadata,
        })
    }
}

fn parse_event_type(raw: &str) -> Result<TrackingEventType, GatewayError> {
    match raw {
        "impression" => Ok(TrackingEventType::Impression),
        "click" => Ok(TrackingEventType::Click),
        "conversion" => Ok(TrackingEventType::Conversion),
        _ => Err(GatewayError::ValidationFailed {
            field: "event_type",
            reason: "must be a valid value".to_string(),
        }),
    }
}

/// Response body for `POST /tracking` (202 Accepted).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrackEventResponse {
    /// Always `true` on acceptance.
    pub success: bool,
}

/// Query parameters for `GET /tracking`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrackingListParams {
    /// Line item whose events to return.
    pub line_item_id: Option<LineItemId>,
}
