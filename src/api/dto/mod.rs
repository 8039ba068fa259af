//! Data Transfer Objects for REST request/response serialization.
//!
//! Amounts are serialized as JSON strings to keep decimal precision; on
//! input both strings and numbers are accepted. Request DTOs keep every
//! field optional so missing fields surface as validation errors naming
//! the field rather than as opaque body rejections.

pub mod ad_dto;
pub mod line_item_dto;
pub mod tracking_dto;

pub use ad_dto::*;
pub use line_item_dto::*;
pub use tracking_dto::*;
