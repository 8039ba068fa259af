//! # ad-auction-gateway
//!
//! REST gateway that ranks winning ads for a placement query and charges
//! per-campaign budgets for delivery events.
//!
//! A line item (campaign) bids a fixed amount per delivery and carries a
//! finite budget. Auctions match active line items on placement, category
//! and keyword, drop those that can no longer afford their bid, and rank
//! the rest by a category-weighted score. Every tracked impression, click
//! or conversion charges one bid against the line item's budget.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + validation (api/)
//!     │
//!     ├── LineItemService ── AuctionService ── LedgerService (service/)
//!     │
//!     ├── LineItemStore (per-record locks) (domain/)
//!     └── EventLog (append-only) (domain/)
//! ```
//!
//! All state is in memory and is lost on restart.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
