//! Budget ledger: charges line items for delivery events.

use std::sync::Arc;

use crate::domain::{EventLog, LineItem, LineItemId, LineItemStore, TrackingEvent};
use crate::error::GatewayError;

/// Applies tracking events to line item budgets.
///
/// Every accepted event charges the referenced line item one bid under that
/// line item's write lock, then lands in the [`EventLog`]. Charges against
/// the same line item are therefore serialized and none are lost; charges
/// against different line items proceed in parallel.
#[derive(Debug, Clone)]
pub struct LedgerService {
    store: Arc<LineItemStore>,
    log: Arc<EventLog>,
}

impl LedgerService {
    /// Creates a ledger over `store` that records into `log`.
    #[must_use]
    pub fn new(store: Arc<LineItemStore>, log: Arc<EventLog>) -> Self {
        Self { store, log }
    }

    /// Charges the referenced line item and records the event.
    ///
    /// The budget may drop below zero on the last delivery; the status flips
    /// to exhausted as soon as the budget is no longer positive. Returns the
    /// line item as it stands after the charge.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LineItemNotFound`] if the event references an
    /// unknown line item. Nothing is recorded in that case.
    pub async fn record_event(&self, event: TrackingEvent) -> Result<LineItem, GatewayError> {
        let record = self.store.get(event.line_item_id).await?;
        let mut item = record.write().await;

        let was_active = item.is_active();
        let budget = item.charge();
        let updated = item.clone();
        let event_type = event.event_type;
        let sequence = self.log.append(event).await;
        drop(item);

        tracing::info!(
            line_item_id = %updated.id,
            %event_type,
            sequence,
            %budget,
            status = ?updated.status(),
            "line item charged"
        );
        if was_active && !updated.is_active() {
            tracing::info!(line_item_id = %updated.id, %budget, "line item budget exhausted");
        }
        Ok(updated)
    }

    /// Returns the events recorded against `line_item_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LineItemNotFound`] if the line item is unknown.
    pub async fn events_for(
        &self,
        line_item_id: LineItemId,
    ) -> Result<Vec<TrackingEvent>, GatewayError> {
        self.store.get(line_item_id).await?;
        Ok(self.log.for_line_item(line_item_id).await)
    }

    /// Returns the total number of recorded events.
    pub async fn event_count(&self) -> usize {
        self.log.len().await
    }
}
