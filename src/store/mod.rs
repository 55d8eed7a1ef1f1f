//! Balance store: authoritative holder of account balances.
//!
//! The coordinator depends only on the [`BalanceStore`] trait, never on a
//! concrete storage technology. Two backends implement it:
//!
//! - [`MemoryStore`]: concurrent in-process map, used in tests and in
//!   deployments without a database
//! - [`PostgresStore`]: PostgreSQL via sqlx
//!
//! # Atomicity Contract
//!
//! `debit` is the sole synchronization point for concurrent withdrawals
//! against the same account. Each backend performs the sufficiency check and
//! the balance mutation as one atomic operation (row lock inside a database
//! transaction, or the per-entry lock of the concurrent map), never as a
//! read followed by a separate write at the application layer. Two concurrent
//! debits can therefore never both pass the check against a stale balance.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::{error::AppError, models::account::Account};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage contract for account balances.
///
/// # Operations
///
/// - `create_account`: insert a new account with an initial balance
/// - `get_account`: read an account, no side effects
/// - `debit`: atomic conditional decrease; fails with
///   [`AppError::InsufficientBalance`] without mutating when the balance does
///   not cover the amount
/// - `credit`: increase the balance; used by the coordinator exclusively as
///   the compensating action for a debit whose disbursement failed
///
/// `debit` and `credit` return the resulting balance in cents.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    async fn create_account(
        &self,
        account_name: String,
        initial_balance_cents: i64,
    ) -> Result<Account, AppError>;

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, AppError>;

    /// Atomically subtract `amount_cents` from the account balance.
    ///
    /// # Errors
    ///
    /// - [`AppError::AccountNotFound`] if the account does not exist
    /// - [`AppError::InsufficientBalance`] if the balance is smaller than
    ///   `amount_cents`; the balance is left untouched
    async fn debit(&self, account_id: Uuid, amount_cents: i64) -> Result<i64, AppError>;

    /// Add `amount_cents` back to the account balance.
    ///
    /// Succeeds whenever the paired debit succeeded, since accounts are never
    /// deleted by this service.
    async fn credit(&self, account_id: Uuid, amount_cents: i64) -> Result<i64, AppError>;
}
