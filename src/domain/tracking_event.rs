//! Delivery and interaction facts reported against a line item.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::LineItemId;

/// Kind of delivery event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrackingEventType {
    /// The ad was displayed.
    Impression,
    /// The ad was clicked.
    Click,
    /// The click led to a conversion.
    Conversion,
}

impl TrackingEventType {
    /// Returns the wire name of the event type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Impression => "impression",
            Self::Click => "click",
            Self::Conversion => "conversion",
        }
    }
}

impl fmt::Display for TrackingEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of an impression, click or conversion.
///
/// Every accepted event charges the referenced line item one bid and is
/// appended to the [`super::EventLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrackingEvent {
    /// Kind of event.
    pub event_type: TrackingEventType,
    /// Line item the event is charged to.
    pub line_item_id: LineItemId,
    /// When the event happened, as reported by the client.
    pub timestamp: DateTime<Utc>,
    /// Slot the ad was served in.
    pub placement: String,
    /// End user the ad was served to.
    pub user_id: String,
    /// Free-form client metadata.
    pub metadata: HashMap<String, String>,
}
