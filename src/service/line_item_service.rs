//! Line item service: creation, lookup, listing and query matching.

use std::sync::Arc;

use crate::domain::{LineItem, LineItemId, LineItemStore, NewLineItem};
use crate::error::GatewayError;

/// Front door to the [`LineItemStore`].
///
/// Holds no state of its own; every call goes straight to the shared store
/// so budget changes made by the ledger are visible to the next auction.
#[derive(Debug, Clone)]
pub struct LineItemService {
    store: Arc<LineItemStore>,
}

impl LineItemService {
    /// Creates a new `LineItemService` over `store`.
    #[must_use]
    pub fn new(store: Arc<LineItemStore>) -> Self {
        Self { store }
    }

    /// Returns a reference to the inner [`LineItemStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<LineItemStore> {
        &self.store
    }

    /// Creates and stores a line item from a validated spec.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] if the store cannot take
    /// another line item.
    pub async fn create(&self, spec: NewLineItem) -> Result<LineItem, GatewayError> {
        let item = LineItem::new(spec);
        let created = item.clone();
        self.store.insert(item).await?;
        tracing::info!(
            line_item_id = %created.id,
            advertiser_id = %created.advertiser_id,
            placement = %created.placement,
            bid = %created.bid,
            budget = %created.budget(),
            "line item created"
        );
        Ok(created)
    }

    /// Returns the current state of a line item.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LineItemNotFound`] if `id` is unknown.
    pub async fn get(&self, id: LineItemId) -> Result<LineItem, GatewayError> {
        self.store.snapshot(id).await
    }

    /// Lists line items, optionally filtered by advertiser and placement.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list(
        &self,
        advertiser_id: Option<&str>,
        placement: Option<&str>,
    ) -> Result<Vec<LineItem>, GatewayError> {
        Ok(self.store.list(advertiser_id, placement).await)
    }

    /// Returns the active line items eligible for a query, in store order.
    ///
    /// A line item matches when it is active, targets `placement`, and
    /// lists both `category` and `keyword`. No match is an empty result,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn find_matching(
        &self,
        placement: &str,
        category: &str,
        keyword: &str,
    ) -> Result<Vec<LineItem>, GatewayError> {
        let matched = self
            .store
            .scan(|item| item.matches(placement, category, keyword))
            .await;
        tracing::debug!(placement, category, keyword, matched = matched.len(), "matched line items");
        Ok(matched)
    }
}
