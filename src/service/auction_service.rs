//! Auction service: scores matched line items and ranks winning ads.

use rust_decimal::Decimal;

use super::LineItemService;
use crate::domain::{Ad, CATEGORY_WEIGHT_FACTOR, CategoryWeights, LineItem};
use crate::error::GatewayError;

/// Ranks the line items eligible for a placement query.
///
/// Reads line items without holding any lock across the auction, so a
/// campaign may still be ranked a moment before a concurrent delivery
/// event exhausts it.
#[derive(Debug, Clone)]
pub struct AuctionService {
    line_items: LineItemService,
    weights: CategoryWeights,
}

impl AuctionService {
    /// Creates an auction over `line_items` scored with `weights`.
    #[must_use]
    pub fn new(line_items: LineItemService, weights: CategoryWeights) -> Self {
        Self {
            line_items,
            weights,
        }
    }

    /// Returns the category weight table in use.
    #[must_use]
    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Scores a line item: `bid * (1 + 0.5 * affinity)`, where affinity is
    /// summed over the line item's whole category set. The score is
    /// normalized, so `15.0` comes back as `15`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the score does not fit in a
    /// [`Decimal`].
    pub fn score(&self, item: &LineItem) -> Result<Decimal, GatewayError> {
        self.weights
            .affinity(&item.categories)
            .and_then(|affinity| CATEGORY_WEIGHT_FACTOR.checked_mul(affinity))
            .and_then(|weighted| Decimal::ONE.checked_add(weighted))
            .and_then(|multiplier| item.bid.checked_mul(multiplier))
            .map(|score| score.normalize())
            .ok_or_else(|| GatewayError::Internal(format!("score overflow for line item {}", item.id)))
    }

    /// Returns the winning ads for a query, highest score first.
    ///
    /// Line items whose budget no longer covers their bid are dropped.
    /// Equal scores keep the matching order. Serve URLs are left empty.
    ///
    /// # Errors
    ///
    /// Propagates failures from matching and scoring.
    pub async fn rank(
        &self,
        placement: &str,
        category: &str,
        keyword: &str,
    ) -> Result<Vec<Ad>, GatewayError> {
        let candidates = self
            .line_items
            .find_matching(placement, category, keyword)
            .await?;

        let mut ads = candidates
            .iter()
            .filter(|item| item.can_afford_bid())
            .map(|item| Ok(Ad::from_line_item(item, self.score(item)?)))
            .collect::<Result<Vec<Ad>, GatewayError>>()?;

        // `sort_by` is stable
        ads.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            placement,
            category,
            keyword,
            candidates = candidates.len(),
            winners = ads.len(),
            "auction ranked"
        );
        Ok(ads)
    }
}
