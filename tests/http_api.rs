//! End-to-end tests against the HTTP router on an ephemeral port.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use ad_auction_gateway::api;
use ad_auction_gateway::app_state::AppState;
use ad_auction_gateway::domain::{CategoryWeights, EventLog, LineItemStore};
use reqwest::StatusCode;
use serde_json::{Value, json};

struct TestApp {
    base: String,
    client: reqwest::Client,
}

impl TestApp {
    async fn spawn() -> Self {
        let state = AppState::new(
            Arc::new(LineItemStore::default()),
            Arc::new(EventLog::new()),
            CategoryWeights::default(),
        );
        let app = api::build_router().with_state(state);
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("cannot bind test listener");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("listener has no address");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let Ok(resp) = self.client.get(self.url(path)).send().await else {
            panic!("GET {path} failed");
        };
        let status = resp.status();
        let body = resp.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let Ok(resp) = self.client.post(self.url(path)).json(body).send().await else {
            panic!("POST {path} failed");
        };
        let status = resp.status();
        let body = resp.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    async fn create_line_item(&self, body: Value) -> String {
        let (status, created) = self.post("/api/v1/lineitems", &body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
        let Some(id) = created["id"].as_str() else {
            panic!("created line item has no id: {created}");
        };
        id.to_string()
    }

    async fn track(&self, line_item_id: &str) -> (StatusCode, Value) {
        let event = json!({
            "event_type": "impression",
            "line_item_id": line_item_id,
            "timestamp": "2025-06-01T12:00:00Z",
            "placement": "homepage",
            "user_id": "user42",
            "metadata": {"browser": "firefox"}
        });
        self.post("/api/v1/tracking", &event).await
    }
}

fn line_item(bid: u32, budget: u32, categories: &[&str]) -> Value {
    json!({
        "name": "Summer Phones",
        "advertiser_id": "adv1",
        "bid": bid,
        "budget": budget,
        "placement": "homepage",
        "categories": categories,
        "keywords": ["phone"]
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn category_weights_are_listed() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/config/category-weights").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(5));
    assert_eq!(body[0]["category"], "electronics");
    assert_eq!(body[0]["weight"], "1.5");
}

#[tokio::test]
async fn create_and_fetch_line_item() {
    let app = TestApp::spawn().await;
    let id = app.create_line_item(line_item(2, 100, &["electronics"])).await;

    let (status, body) = app.get(&format!("/api/v1/lineitems/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["bid"], "2");
    assert_eq!(body["budget"], "100");
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn unknown_line_item_is_404() {
    let app = TestApp::spawn().await;
    let path = format!("/api/v1/lineitems/{}", uuid::Uuid::new_v4());
    let (status, body) = app.get(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);
}

#[tokio::test]
async fn invalid_line_item_names_the_field() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post("/api/v1/lineitems", &line_item(60, 100, &["electronics"]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1002);
    assert_eq!(body["error"]["details"], "bid");
}

#[tokio::test]
async fn malformed_body_is_invalid_request() {
    let app = TestApp::spawn().await;
    let Ok(resp) = app
        .client
        .post(app.url("/api/v1/lineitems"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn list_filters_by_advertiser() {
    let app = TestApp::spawn().await;
    app.create_line_item(line_item(1, 10, &["sale"])).await;
    let mut other = line_item(1, 10, &["sale"]);
    other["advertiser_id"] = json!("adv2");
    app.create_line_item(other).await;

    let (status, all) = app.get("/api/v1/lineitems").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (_, filtered) = app.get("/api/v1/lineitems?advertiser_id=adv2").await;
    assert_eq!(filtered.as_array().map(Vec::len), Some(1));
    assert_eq!(filtered[0]["advertiser_id"], "adv2");
}

#[tokio::test]
async fn winning_ads_are_scored_and_linked() {
    let app = TestApp::spawn().await;
    let id = app.create_line_item(line_item(5, 5, &["electronics"])).await;

    let (status, ads) = app
        .get("/api/v1/ads?placement=homepage&category=electronics&keyword=phone")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ads.as_array().map(Vec::len), Some(1));
    assert_eq!(ads[0]["id"], id.as_str());
    assert_eq!(ads[0]["score"], "11.25");
    assert_eq!(ads[0]["serve_url"], format!("/api/v1/lineitems/{id}"));
}

#[tokio::test]
async fn ads_are_ordered_by_score() {
    let app = TestApp::spawn().await;
    let low = app.create_line_item(line_item(8, 100, &["books"])).await;
    let high = app.create_line_item(line_item(10, 100, &["books"])).await;

    let (status, ads) = app
        .get("/api/v1/ads?placement=homepage&category=books&keyword=phone")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ads[0]["id"], high.as_str());
    assert_eq!(ads[0]["score"], "15");
    assert_eq!(ads[1]["id"], low.as_str());
    assert_eq!(ads[1]["score"], "12");
}

#[tokio::test]
async fn no_winner_is_204() {
    let app = TestApp::spawn().await;
    let Ok(resp) = app
        .client
        .get(app.url("/api/v1/ads?placement=sidebar&category=travel&keyword=beach"))
        .send()
        .await
    else {
        panic!("GET failed");
    };
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn ad_query_requires_every_label() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/v1/ads?placement=homepage&category=sale").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"], "keyword");
}

#[tokio::test]
async fn tracking_exhausts_budget_and_removes_ad() {
    let app = TestApp::spawn().await;
    let id = app.create_line_item(line_item(4, 4, &["electronics"])).await;

    let (status, body) = app.track(&id).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["success"], true);

    let (_, item) = app.get(&format!("/api/v1/lineitems/{id}")).await;
    assert_eq!(item["budget"], "0");
    assert_eq!(item["status"], "exhausted");

    let Ok(resp) = app
        .client
        .get(app.url("/api/v1/ads?placement=homepage&category=electronics&keyword=phone"))
        .send()
        .await
    else {
        panic!("GET failed");
    };
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let (status, events) = app.get(&format!("/api/v1/tracking?line_item_id={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().map(Vec::len), Some(1));
    assert_eq!(events[0]["event_type"], "impression");
}

#[tokio::test]
async fn tracking_unknown_line_item_is_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app.track(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1003);
}

#[tokio::test]
async fn tracking_validates_event_type() {
    let app = TestApp::spawn().await;
    let id = app.create_line_item(line_item(1, 10, &["sale"])).await;
    let event = json!({
        "event_type": "view",
        "line_item_id": id,
        "timestamp": "2025-06-01T12:00:00Z",
        "placement": "homepage",
        "user_id": "user42",
        "metadata": {}
    });
    let (status, body) = app.post("/api/v1/tracking", &event).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"], "event_type");

    let (_, item) = app.get(&format!("/api/v1/lineitems/{id}")).await;
    assert_eq!(item["budget"], "10");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tracking_charges_every_event() {
    let app = Arc::new(TestApp::spawn().await);
    let id = app.create_line_item(line_item(2, 1000, &["sale"])).await;

    let mut handles = Vec::new();
    for _ in 0..50 {
        let app = Arc::clone(&app);
        let id = id.clone();
        handles.push(tokio::spawn(async move { app.track(&id).await.0 }));
    }
    for handle in handles {
        assert!(matches!(handle.await, Ok(StatusCode::ACCEPTED)));
    }

    let (_, item) = app.get(&format!("/api/v1/lineitems/{id}")).await;
    assert_eq!(item["budget"], "900");
    assert_eq!(item["status"], "active");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;
    let (status, doc) = app.get(api::OPENAPI_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/ads"].is_object());
}

#[tokio::test]
async fn malformed_ids_get_json_errors() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/v1/lineitems/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);

    let (status, body) = app.get("/api/v1/tracking?line_item_id=li-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
}
