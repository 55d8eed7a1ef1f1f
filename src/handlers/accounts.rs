//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /api/v1/accounts - Create new account
//! - GET /api/v1/accounts/:id - Get account by ID
//!
//! Accounts exist so withdrawals have something to debit; there is no
//! deletion and no listing, and deposits beyond the initial balance are out
//! of scope.

use crate::{
    AppState,
    error::AppError,
    models::account::{AccountResponse, CreateAccountRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "account_name": "My Account",
///   "initial_balance_cents": 10000
/// }
/// ```
///
/// # Responses
///
/// - **201 Created**: the created account
/// - **400**: empty name or negative initial balance
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    if request.account_name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "account_name must not be empty".to_string(),
        ));
    }
    if request.initial_balance_cents < 0 {
        return Err(AppError::InvalidRequest(
            "initial_balance_cents must not be negative".to_string(),
        ));
    }

    let account = state
        .store
        .create_account(request.account_name, request.initial_balance_cents)
        .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Get a specific account by ID.
///
/// # Responses
///
/// - **200 OK**: the account with its current balance
/// - **404**: account does not exist
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state
        .store
        .get_account(account_id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account.into()))
}
