//! Withdrawal HTTP handler.
//!
//! `POST /api/v1/withdrawals` - withdraw money from an account and trigger
//! the external disbursement.

use crate::{
    AppState,
    error::AppError,
    models::withdrawal::{WithdrawRequest, WithdrawalReceipt},
};
use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

/// Withdraw money from an account.
///
/// # Request Body
///
/// ```json
/// {
///   "account_id": "550e8400-...",
///   "amount_cents": 5000
/// }
/// ```
///
/// # Responses
///
/// - **202 Accepted**: balance debited, disbursement accepted; body is the
///   [`WithdrawalReceipt`]
/// - **400**: malformed account id or non-positive amount (`invalid_request`)
/// - **404**: account does not exist (`account_not_found`)
/// - **422**: balance below the requested amount (`insufficient_balance`)
/// - **502**: disbursement failed; the balance has been restored
///   (`disbursement_failed`)
/// - **500**: the compensating credit failed (`balance_inconsistency`)
pub async fn create_withdrawal(
    State(state): State<AppState>,
    Json(request): Json<WithdrawRequest>,
) -> Result<(StatusCode, Json<WithdrawalReceipt>), AppError> {
    // Parse here rather than in serde so a bad id gets a typed rejection
    let account_id = Uuid::parse_str(&request.account_id).map_err(|_| {
        AppError::InvalidRequest("account_id must be a valid UUID".to_string())
    })?;

    let receipt = state
        .withdrawals
        .withdraw(account_id, request.amount_cents)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(receipt)))
}
