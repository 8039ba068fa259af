//! Auction result projection.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::{LineItem, LineItemId};

/// A winning ad: a ranked line item projected for display.
///
/// Built fresh on every auction and never stored. `serve_url` is empty when
/// the auction returns it; the HTTP layer fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ad {
    /// Line item the ad was projected from.
    pub id: LineItemId,
    /// Line item name.
    pub name: String,
    /// Owning advertiser.
    pub advertiser_id: String,
    /// Bid charged per delivery.
    #[schema(value_type = String)]
    pub bid: Decimal,
    /// Slot the ad competes for.
    pub placement: String,
    /// Ranking score.
    #[schema(value_type = String)]
    pub score: Decimal,
    /// Where the ad details can be fetched.
    pub serve_url: String,
}

impl Ad {
    /// Projects a scored line item.
    #[must_use]
    pub fn from_line_item(item: &LineItem, score: Decimal) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            advertiser_id: item.advertiser_id.clone(),
            bid: item.bid,
            placement: item.placement.clone(),
            score,
            serve_url: String::new(),
        }
    }
}
