//! Black-box tests for the withdrawal API.
//!
//! Each test builds the full router over an in-memory balance store and an
//! injected disburser, seeds one account with 1000 cents through the public
//! API, and drives requests with `tower::ServiceExt::oneshot`. Assertions
//! check both the HTTP response and the account balance afterwards, since the
//! core guarantee is about the balance, not the status code.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tower::ServiceExt;
use uuid::Uuid;
use withdrawal_service::{
    AppState, app,
    disburse::{DisburseError, Disburser},
    services::withdrawal_service::WithdrawalService,
    store::{BalanceStore, MemoryStore},
};

/// Disburser whose outcome can be flipped per test.
struct SwitchableDisburser {
    fail: AtomicBool,
}

impl SwitchableDisburser {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: AtomicBool::new(false),
        })
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Disburser for SwitchableDisburser {
    async fn disburse(&self, _: Uuid, _: i64) -> Result<(), DisburseError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DisburseError::Rejected("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
    disburser: Arc<SwitchableDisburser>,
    account_id: Uuid,
}

/// Build the app and seed one account with 1000 cents via the public API.
async fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let disburser = SwitchableDisburser::new();
    let state = AppState {
        withdrawals: WithdrawalService::new(store.clone(), disburser.clone()),
        store: store.clone(),
    };
    let router = app(state);

    let (status, body) = send(
        &router,
        "POST",
        "/api/v1/accounts",
        Some(json!({ "account_name": "checking", "initial_balance_cents": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let account_id = body["id"].as_str().unwrap().parse().unwrap();

    TestApp {
        router,
        store,
        disburser,
        account_id,
    }
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

impl TestApp {
    async fn withdraw(&self, body: Value) -> (StatusCode, Value) {
        send(&self.router, "POST", "/api/v1/withdrawals", Some(body)).await
    }

    async fn balance(&self) -> i64 {
        self.store
            .get_account(self.account_id)
            .await
            .unwrap()
            .unwrap()
            .balance_cents
    }
}

#[tokio::test]
async fn health_reports_store_connected() {
    let app = test_app().await;

    let (status, body) = send(&app.router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "connected");
}

#[tokio::test]
async fn rejects_malformed_account_id() {
    let app = test_app().await;

    let (status, body) = app
        .withdraw(json!({ "account_id": "ahoj", "amount_cents": 1000 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("id")
    );
    assert_eq!(app.balance().await, 1000);
}

#[tokio::test]
async fn rejects_unknown_account() {
    let app = test_app().await;

    let (status, body) = app
        .withdraw(json!({ "account_id": Uuid::new_v4(), "amount_cents": 1000 }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "account_not_found");
}

#[tokio::test]
async fn rejects_non_numeric_amount() {
    let app = test_app().await;

    let (status, _) = app
        .withdraw(json!({ "account_id": app.account_id, "amount_cents": "ahoj" }))
        .await;

    assert!(status.is_client_error());
    assert_eq!(app.balance().await, 1000);
}

#[tokio::test]
async fn rejects_negative_amount() {
    let app = test_app().await;

    let (status, body) = app
        .withdraw(json!({ "account_id": app.account_id, "amount_cents": -1 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("amount")
    );
    assert_eq!(app.balance().await, 1000);
}

#[tokio::test]
async fn rejects_insufficient_balance() {
    let app = test_app().await;

    let (status, body) = app
        .withdraw(json!({ "account_id": app.account_id, "amount_cents": 2000 }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "insufficient_balance");
    assert_eq!(app.balance().await, 1000);
}

#[tokio::test]
async fn withdraws_the_full_balance() {
    let app = test_app().await;

    let (status, body) = app
        .withdraw(json!({ "account_id": app.account_id, "amount_cents": 1000 }))
        .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["amount_cents"], 1000);
    assert_eq!(body["balance_cents"], 0);
    assert_eq!(app.balance().await, 0);
}

#[tokio::test]
async fn failed_disbursement_does_not_subtract_the_amount() {
    let app = test_app().await;
    app.disburser.set_failing(true);

    let (status, body) = app
        .withdraw(json!({ "account_id": app.account_id, "amount_cents": 1000 }))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "disbursement_failed");
    assert_eq!(app.balance().await, 1000);

    // The account is usable again once the disburser recovers
    app.disburser.set_failing(false);
    let (status, _) = app
        .withdraw(json!({ "account_id": app.account_id, "amount_cents": 1000 }))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(app.balance().await, 0);
}

#[tokio::test]
async fn account_endpoint_reflects_withdrawals() {
    let app = test_app().await;

    app.withdraw(json!({ "account_id": app.account_id, "amount_cents": 250 }))
        .await;

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/v1/accounts/{}", app.account_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance_cents"], 750);
}

#[tokio::test]
async fn rejects_account_with_negative_initial_balance() {
    let app = test_app().await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/accounts",
        Some(json!({ "account_name": "bad", "initial_balance_cents": -5 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
}
