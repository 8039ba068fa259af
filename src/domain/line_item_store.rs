//! Concurrent line item storage with per-record locking.
//!
//! [`LineItemStore`] owns every [`LineItem`]. Each record sits behind its
//! own [`tokio::sync::RwLock`], so budget charges on different campaigns
//! run in parallel while charges on the same campaign are serialized.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{LineItem, LineItemId};
use crate::error::GatewayError;

/// Default maximum number of line items held in memory.
pub const DEFAULT_STORE_CAPACITY: usize = 100_000;

#[derive(Debug, Default)]
struct StoreInner {
    index: HashMap<LineItemId, Arc<RwLock<LineItem>>>,
    /// Insertion order; scans walk this so ties rank deterministically.
    order: Vec<Arc<RwLock<LineItem>>>,
}

/// In-memory repository of line items.
///
/// # Concurrency
///
/// - The outer lock guards only the index and is held briefly for insert,
///   lookup and for copying the scan order.
/// - Reads of one record run concurrently; writes to one record are
///   serialized by its own lock.
/// - A scan takes each record's read lock in turn and never holds two
///   record locks at once.
/// - Records never leave the crate by reference, so budgets only move
///   through the ledger:
///
/// ```compile_fail
/// # async fn bypass(
/// #     store: &ad_auction_gateway::domain::LineItemStore,
/// #     id: ad_auction_gateway::domain::LineItemId,
/// # ) {
/// let record = store.get(id).await;
/// # }
/// ```
#[derive(Debug)]
pub struct LineItemStore {
    inner: RwLock<StoreInner>,
    capacity: usize,
}

impl LineItemStore {
    /// Creates an empty store that accepts at most `capacity` line items.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            capacity,
        }
    }

    /// Inserts a line item.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] if the store is full and
    /// [`GatewayError::Internal`] if the ID is already taken (never expected
    /// with UUID v4).
    pub async fn insert(&self, item: LineItem) -> Result<LineItemId, GatewayError> {
        let id = item.id;
        let mut inner = self.inner.write().await;
        if inner.index.len() >= self.capacity {
            return Err(GatewayError::StoreUnavailable(format!(
                "line item store is full ({} items)",
                self.capacity
            )));
        }
        if inner.index.contains_key(&id) {
            return Err(GatewayError::Internal(format!(
                "line item {id} already exists"
            )));
        }
        let record = Arc::new(RwLock::new(item));
        inner.index.insert(id, Arc::clone(&record));
        inner.order.push(record);
        Ok(id)
    }

    /// Returns the lock guarding a single line item. Crate-private: callers
    /// outside the crate only ever see copies.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LineItemNotFound`] if no line item has `id`.
    pub(crate) async fn get(&self, id: LineItemId) -> Result<Arc<RwLock<LineItem>>, GatewayError> {
        let inner = self.inner.read().await;
        inner
            .index
            .get(&id)
            .cloned()
            .ok_or(GatewayError::LineItemNotFound(id))
    }

    /// Returns a point-in-time copy of a single line item.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LineItemNotFound`] if no line item has `id`.
    pub async fn snapshot(&self, id: LineItemId) -> Result<LineItem, GatewayError> {
        let record = self.get(id).await?;
        let item = record.read().await;
        Ok(item.clone())
    }

    /// Copies every line item accepted by `filter`, in insertion order.
    ///
    /// Each record is read under its own lock, so a copy never shows a
    /// half-applied charge; the scan as a whole is not a single snapshot.
    pub async fn scan<F>(&self, filter: F) -> Vec<LineItem>
    where
        F: Fn(&LineItem) -> bool,
    {
        let records = self.inner.read().await.order.clone();
        let mut out = Vec::new();
        for record in records {
            let item = record.read().await;
            if filter(&item) {
                out.push(item.clone());
            }
        }
        out
    }

    /// Returns line items, optionally narrowed to an advertiser and/or a
    /// placement.
    pub async fn list(&self, advertiser_id: Option<&str>, placement: Option<&str>) -> Vec<LineItem> {
        self.scan(|item| {
            advertiser_id.is_none_or(|a| item.advertiser_id == a)
                && placement.is_none_or(|p| item.placement == p)
        })
        .await
    }

    /// Returns the number of stored line items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.index.len()
    }

    /// Returns `true` if the store holds no line items.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.index.is_empty()
    }
}

impl Default for LineItemStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_CAPACITY)
    }
}
