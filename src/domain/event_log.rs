//! Append-only in-memory log of accepted tracking events.

use tokio::sync::RwLock;

use super::{LineItemId, TrackingEvent};

/// Append-only record of every tracking event the ledger accepted.
///
/// Entries are never mutated or removed. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RwLock<Vec<TrackingEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its zero-based sequence number.
    pub async fn append(&self, event: TrackingEvent) -> usize {
        let mut events = self.events.write().await;
        events.push(event);
        events.len() - 1
    }

    /// Returns the events charged to `line_item_id`, oldest first.
    pub async fn for_line_item(&self, line_item_id: LineItemId) -> Vec<TrackingEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.line_item_id == line_item_id)
            .cloned()
            .collect()
    }

    /// Returns the number of recorded events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}
