//! Service layer: business logic orchestration.
//!
//! [`LineItemService`] fronts the campaign store and does query matching,
//! [`AuctionService`] scores and ranks matched campaigns, and
//! [`LedgerService`] charges budgets for delivery events.

pub mod auction_service;
pub mod ledger_service;
pub mod line_item_service;

pub use auction_service::AuctionService;
pub use ledger_service::LedgerService;
pub use line_item_service::LineItemService;
