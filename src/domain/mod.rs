//! Domain layer: line items, tracking events, and their in-memory stores.
//!
//! Contains campaign identity and spend accounting, the auction result
//! projection, the category weight table, the concurrent line item store
//! and the append-only event log.

pub mod ad;
pub mod category_weights;
pub mod event_log;
pub mod line_item;
pub mod line_item_id;
pub mod line_item_store;
pub mod tracking_event;

pub use ad::Ad;
pub use category_weights::{CATEGORY_WEIGHT_FACTOR, CategoryWeights, MAX_CATEGORY_WEIGHT};
pub use event_log::EventLog;
pub use line_item::{LineItem, LineItemStatus, NewLineItem};
pub use line_item_id::LineItemId;
pub use line_item_store::LineItemStore;
pub use tracking_event::{TrackingEvent, TrackingEventType};
