//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{CategoryWeights, EventLog, LineItemStore};
use crate::service::{AuctionService, LedgerService, LineItemService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// All three services share one [`LineItemStore`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// Line item creation, lookup and listing.
    pub line_items: Arc<LineItemService>,
    /// Winning ad ranking.
    pub auction: Arc<AuctionService>,
    /// Budget charging for tracking events.
    pub ledger: Arc<LedgerService>,
}

impl AppState {
    /// Wires the services over a shared store and event log.
    #[must_use]
    pub fn new(store: Arc<LineItemStore>, log: Arc<EventLog>, weights: CategoryWeights) -> Self {
        let line_items = LineItemService::new(Arc::clone(&store));
        let auction = AuctionService::new(line_items.clone(), weights);
        let ledger = LedgerService::new(store, log);
        Self {
            line_items: Arc::new(line_items),
            auction: Arc::new(auction),
            ledger: Arc::new(ledger),
        }
    }
}
