//! Withdrawal API request/response types.
//!
//! A withdrawal is ephemeral: it is constructed per request, drives one run of
//! the coordinator workflow, and is never persisted. Only the account balance
//! records its effect.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to withdraw money from an account.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "amount_cents": 5000
/// }
/// ```
///
/// # Validation
///
/// - `account_id` arrives as a string and is parsed to a UUID in the handler,
///   so a malformed id is reported as a 400 with a stable error code instead
///   of an opaque deserialization failure.
/// - `amount_cents` must be positive; checked by the coordinator before any
///   store access.
#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    /// Account to withdraw from
    pub account_id: String,

    /// Amount to withdraw in cents
    pub amount_cents: i64,
}

/// Receipt returned for an accepted withdrawal.
///
/// Returned with HTTP 202: the balance has been debited and the external
/// disbursement action has accepted the withdrawal.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "amount_cents": 5000,
///   "balance_cents": 95000
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalReceipt {
    /// Account the withdrawal was taken from
    pub account_id: Uuid,

    /// Amount withdrawn in cents
    pub amount_cents: i64,

    /// Balance remaining after the debit, in cents
    pub balance_cents: i64,
}
