//! Line item (campaign) aggregate and its spend accounting.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::LineItemId;

/// Delivery status of a line item.
///
/// `Active` → `Exhausted` is the only transition and it is one-way. The
/// status is derived from the remaining budget and never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LineItemStatus {
    /// Budget remains; the line item competes in auctions.
    Active,
    /// Budget is zero or negative; the line item no longer matches queries.
    Exhausted,
}

impl LineItemStatus {
    /// Derives the status for a given remaining budget.
    #[must_use]
    pub fn for_budget(budget: Decimal) -> Self {
        if budget <= Decimal::ZERO {
            Self::Exhausted
        } else {
            Self::Active
        }
    }
}

/// Validated input for creating a line item.
///
/// Field-level validation happens at the API boundary before this value is
/// built; the store trusts it.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    /// Display name.
    pub name: String,
    /// Owning advertiser.
    pub advertiser_id: String,
    /// Amount charged per delivery event.
    pub bid: Decimal,
    /// Initial spend budget (at least `bid`).
    pub budget: Decimal,
    /// Target ad slot.
    pub placement: String,
    /// Category labels.
    pub categories: Vec<String>,
    /// Keyword labels.
    pub keywords: Vec<String>,
}

/// A campaign competing for placements with a finite spend budget.
///
/// Only `budget`, `status` and `updated_at` change after creation, and only
/// when [`crate::service::LedgerService`] records an event.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineItem {
    /// Unique identifier (immutable after creation).
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Owning advertiser.
    pub advertiser_id: String,
    /// Amount charged per delivery event.
    #[schema(value_type = String)]
    pub bid: Decimal,
    #[schema(value_type = String)]
    budget: Decimal,
    /// Target ad slot.
    pub placement: String,
    /// Category labels, deduplicated in first-seen order.
    pub categories: Vec<String>,
    /// Keyword labels, deduplicated in first-seen order.
    pub keywords: Vec<String>,
    status: LineItemStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LineItem {
    /// Builds a fresh line item with a new identifier.
    #[must_use]
    pub fn new(spec: NewLineItem) -> Self {
        let now = Utc::now();
        Self {
            id: LineItemId::new(),
            name: spec.name,
            advertiser_id: spec.advertiser_id,
            bid: spec.bid,
            budget: spec.budget,
            placement: spec.placement,
            categories: dedup_labels(spec.categories),
            keywords: dedup_labels(spec.keywords),
            status: LineItemStatus::for_budget(spec.budget),
            created_at: now,
            updated_at: now,
        }
    }

    /// Remaining spend budget. May be negative after the last delivery.
    ///
    /// Read-only outside the crate:
    ///
    /// ```compile_fail
    /// # fn overspend(mut item: ad_auction_gateway::domain::LineItem) {
    /// item.charge();
    /// # }
    /// ```
    #[must_use]
    pub const fn budget(&self) -> Decimal {
        self.budget
    }

    /// Current delivery status.
    #[must_use]
    pub const fn status(&self) -> LineItemStatus {
        self.status
    }

    /// Timestamp of the last budget change.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` while the line item is still delivering.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == LineItemStatus::Active
    }

    /// Returns `true` if the remaining budget covers one more delivery.
    #[must_use]
    pub fn can_afford_bid(&self) -> bool {
        self.budget >= self.bid
    }

    /// Returns `true` if this line item is eligible for the given query.
    #[must_use]
    pub fn matches(&self, placement: &str, category: &str, keyword: &str) -> bool {
        self.is_active()
            && self.placement == placement
            && self.categories.iter().any(|c| c == category)
            && self.keywords.iter().any(|k| k == keyword)
    }

    /// Charges one delivery: subtracts the bid from the budget and
    /// recomputes the status. Returns the new budget.
    ///
    /// The budget is allowed to go negative; no delivery is refused here.
    /// Only the ledger calls this, so every charge has a logged event.
    pub(crate) fn charge(&mut self) -> Decimal {
        self.budget -= self.bid;
        self.status = LineItemStatus::for_budget(self.budget);
        self.updated_at = Utc::now();
        self.budget
    }
}

fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}
