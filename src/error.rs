//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and a stable error code
/// string, so clients can branch on outcomes without parsing messages.
///
/// # Error Categories
///
/// - **Input errors**: malformed id or non-positive amount; detected before
///   any store access, never cause a mutation.
/// - **Business-rule errors**: account absent, insufficient funds; detected by
///   the store, never cause a mutation.
/// - **External-action failures**: the disbursement call errored or timed out
///   after a successful debit; reported only after the compensating credit ran.
/// - **Inconsistency**: the compensating credit itself failed. The one
///   unrecoverable case, surfaced distinctly for external reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Wraps any sqlx::Error via `#[from]`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested account does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account not found")]
    AccountNotFound,

    /// Account has insufficient balance for the requested withdrawal.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// The external disbursement action failed or timed out.
    ///
    /// By the time this error is returned the debited amount has already been
    /// credited back, so the account balance is unchanged.
    ///
    /// Returns HTTP 502 Bad Gateway.
    #[error("Disbursement failed: {0}")]
    DisbursementFailed(String),

    /// The compensating credit after a failed disbursement did not succeed.
    ///
    /// The account is left debited for a withdrawal that was never disbursed.
    /// This is a real accounting discrepancy requiring external reconciliation
    /// and must never be conflated with an ordinary rejection.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error(
        "Balance inconsistency on account {account_id}: debit of {amount_cents} cents could not be compensated"
    )]
    BalanceInconsistency {
        account_id: uuid::Uuid,
        amount_cents: i64,
    },
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `AccountNotFound` → 404 Not Found
/// - `InsufficientBalance` → 422 Unprocessable Entity
/// - `InvalidRequest` → 400 Bad Request
/// - `DisbursementFailed` → 502 Bad Gateway
/// - `BalanceInconsistency` → 500 Internal Server Error
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::AccountNotFound => {
                (StatusCode::NOT_FOUND, "account_not_found", self.to_string())
            }
            AppError::InsufficientBalance => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_balance",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::DisbursementFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "disbursement_failed",
                self.to_string(),
            ),
            AppError::BalanceInconsistency { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "balance_inconsistency",
                self.to_string(),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
