//! Account data model and API request/response types.
//!
//! This module defines:
//! - `Account`: the balance-holding entity
//! - `CreateAccountRequest`: request body for creating accounts
//! - `AccountResponse`: response body returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account with a single balance.
///
/// The same struct is produced by both store backends: `sqlx::FromRow` maps it
/// from the `accounts` table, and the in-memory store builds it directly.
///
/// # Balance Storage
///
/// Balances are stored as `i64` cents to avoid floating-point precision issues
/// in financial arithmetic.
///
/// For example:
/// - $10.50 is stored as 1050 cents
/// - $100.00 is stored as 10000 cents
///
/// The invariant `balance_cents >= 0` holds at all observable times between
/// withdrawals; the Postgres backend additionally enforces it with a CHECK
/// constraint.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Account {
    /// Unique identifier for this account
    pub id: Uuid,

    /// Human-readable name for this account
    pub account_name: String,

    /// Current balance in cents (not dollars)
    ///
    /// Using i64 allows balances up to ~92 quadrillion dollars.
    pub balance_cents: i64,

    /// Timestamp when account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of last balance update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_name": "My Savings Account",
///   "initial_balance_cents": 10000
/// }
/// ```
///
/// # Validation
///
/// - `account_name`: Required, any non-empty string
/// - `initial_balance_cents`: Optional, defaults to 0, must not be negative
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Name for the new account
    pub account_name: String,

    /// Initial balance in cents (defaults to 0 if not provided)
    #[serde(default)]
    pub initial_balance_cents: i64,
}

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "account_name": "My Account",
///   "balance_cents": 100000,
///   "created_at": "2026-08-20T10:00:00Z",
///   "updated_at": "2026-08-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account unique identifier
    pub id: Uuid,

    /// Account name
    pub account_name: String,

    /// Current balance in cents
    pub balance_cents: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            account_name: account.account_name,
            balance_cents: account.balance_cents,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
