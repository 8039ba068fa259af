//! Auction and ledger working over one shared store.

#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;

use ad_auction_gateway::app_state::AppState;
use ad_auction_gateway::domain::{
    CategoryWeights, EventLog, LineItemId, LineItemStatus, LineItemStore, NewLineItem,
    TrackingEvent, TrackingEventType,
};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio_test::{assert_err, assert_ok};

fn state() -> AppState {
    AppState::new(
        Arc::new(LineItemStore::default()),
        Arc::new(EventLog::new()),
        CategoryWeights::default(),
    )
}

fn campaign(name: &str, bid: Decimal, budget: Decimal, categories: &[&str]) -> NewLineItem {
    NewLineItem {
        name: name.to_string(),
        advertiser_id: "adv1".to_string(),
        bid,
        budget,
        placement: "homepage".to_string(),
        categories: categories.iter().map(|c| (*c).to_string()).collect(),
        keywords: vec!["phone".to_string()],
    }
}

fn impression(line_item_id: LineItemId) -> TrackingEvent {
    TrackingEvent {
        event_type: TrackingEventType::Impression,
        line_item_id,
        timestamp: Utc::now(),
        placement: "homepage".to_string(),
        user_id: "user42".to_string(),
        metadata: HashMap::new(),
    }
}

#[tokio::test]
async fn serving_winners_drains_budgets_until_none_remain() {
    let state = state();
    let big = assert_ok!(
        state
            .line_items
            .create(campaign("Big Spender", dec!(3), dec!(7), &["electronics"]))
            .await
    );
    let small = assert_ok!(
        state
            .line_items
            .create(campaign("Small Spender", dec!(2), dec!(4), &["electronics"]))
            .await
    );

    let mut served = Vec::new();
    loop {
        let ads = assert_ok!(state.auction.rank("homepage", "electronics", "phone").await);
        let Some(winner) = ads.first() else {
            break;
        };
        served.push(winner.id);
        assert_ok!(state.ledger.record_event(impression(winner.id)).await);
    }

    // 7 covers two bids of 3; 4 covers two bids of 2
    assert_eq!(served, vec![big.id, big.id, small.id, small.id]);

    let big = assert_ok!(state.line_items.get(big.id).await);
    let small = assert_ok!(state.line_items.get(small.id).await);
    assert_eq!(big.budget(), dec!(1));
    assert_eq!(big.status(), LineItemStatus::Active);
    assert!(!big.can_afford_bid());
    assert_eq!(small.budget(), dec!(0));
    assert_eq!(small.status(), LineItemStatus::Exhausted);
    assert_eq!(state.ledger.event_count().await, 4);
}

#[tokio::test]
async fn unknown_line_item_leaves_no_trace() {
    let state = state();
    let err = assert_err!(state.ledger.record_event(impression(LineItemId::new())).await);
    assert!(err.is_not_found());
    assert_eq!(state.ledger.event_count().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_events_and_auctions_agree_on_final_budget() {
    let state = state();
    let item = assert_ok!(
        state
            .line_items
            .create(campaign("Contended", dec!(0.25), dec!(20), &["sale"]))
            .await
    );

    let id = item.id;
    let mut handles = Vec::new();
    for i in 0..100 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                state.ledger.record_event(impression(id)).await.map(|_| ())
            } else {
                state
                    .auction
                    .rank("homepage", "sale", "phone")
                    .await
                    .map(|_| ())
            }
        }));
    }
    for handle in handles {
        let Ok(result) = handle.await else {
            panic!("task panicked");
        };
        assert_ok!(result);
    }

    let item = assert_ok!(state.line_items.get(id).await);
    assert_eq!(item.budget(), dec!(7.5));
    assert_eq!(item.status(), LineItemStatus::Active);
    assert_eq!(assert_ok!(state.ledger.events_for(item.id).await).len(), 50);
}

#[tokio::test]
async fn budget_moves_only_with_logged_events() {
    let state = state();
    let item = assert_ok!(
        state
            .line_items
            .create(campaign("Ledgered", dec!(5), dec!(5), &["electronics"]))
            .await
    );
    assert_eq!(assert_ok!(state.ledger.events_for(item.id).await).len(), 0);

    let charged = assert_ok!(state.ledger.record_event(impression(item.id)).await);
    assert_eq!(charged.status(), LineItemStatus::Exhausted);

    let events = assert_ok!(state.ledger.events_for(item.id).await);
    let current = assert_ok!(state.line_items.get(item.id).await);
    assert_eq!(events.len(), 1);
    assert_eq!(current.budget(), item.budget() - item.bid * Decimal::from(events.len()));
    assert_eq!(current.updated_at(), charged.updated_at());
}
