//! Withdrawal service library.
//!
//! A REST API server exposing a single business operation: withdraw a
//! monetary amount from an account. The withdrawal debits the balance,
//! triggers an external disbursement action, and guarantees that a failed
//! disbursement never leaves the account debited.
//!
//! # Architecture
//!
//! - [`services::withdrawal_service`] - the withdrawal coordinator (core
//!   workflow and consistency guarantee)
//! - [`store`] - balance store contract with in-memory and Postgres backends
//! - [`disburse`] - the injectable external disbursement capability
//! - [`handlers`] - thin axum route handlers
//! - [`models`] - entities and API request/response types
//!
//! The router is built by [`app`] so integration tests can drive it with
//! `tower::ServiceExt::oneshot` against an in-memory store and a mock
//! disburser.

pub mod config;
pub mod db;
pub mod disburse;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};
use services::withdrawal_service::WithdrawalService;
use std::sync::Arc;
use store::BalanceStore;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Balance store, also used directly by the account endpoints
    pub store: Arc<dyn BalanceStore>,

    /// Withdrawal coordinator
    pub withdrawals: WithdrawalService,
}

/// Build the HTTP router.
///
/// # Routes
///
/// - `GET /health` - liveness and store reachability
/// - `POST /api/v1/accounts` - create account
/// - `GET /api/v1/accounts/{id}` - get account
/// - `POST /api/v1/withdrawals` - withdraw from an account
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/accounts", post(handlers::accounts::create_account))
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account),
        )
        .route(
            "/api/v1/withdrawals",
            post(handlers::withdrawals::create_withdrawal),
        )
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
