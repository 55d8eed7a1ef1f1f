//! Withdrawal coordinator - the core withdrawal transaction workflow.
//!
//! This service drives the end-to-end sequence for one withdrawal:
//!
//! 1. Validate the amount (no store access)
//! 2. Resolve the account
//! 3. Atomic conditional debit
//! 4. External disbursement call
//! 5. Commit, or compensate with a credit when disbursement fails
//!
//! # Consistency Guarantee
//!
//! A failed disbursement must not leave the account debited. The debit lands
//! before the external call is made, so no account lock is held while the
//! (possibly slow) disbursement is in flight; if the call fails or times out,
//! the same amount is credited back before the failure is reported. The
//! transient over-debit during the in-flight window is the accepted failure
//! mode; the alternative ordering (disburse first, debit after) could move
//! money out with no record of it.
//!
//! Compensation runs exactly once per failed attempt and there is no
//! disbursement retry here. Retried client requests are new withdrawals:
//! two identical requests that both succeed debit the account twice.

use crate::{
    disburse::Disburser, error::AppError, models::withdrawal::WithdrawalReceipt,
    store::BalanceStore,
};
use std::sync::Arc;
use uuid::Uuid;

/// Orchestrates withdrawals against a balance store and a disbursement action.
///
/// Both collaborators are supplied at construction time, so tests swap in
/// mocks without any global state.
#[derive(Clone)]
pub struct WithdrawalService {
    store: Arc<dyn BalanceStore>,
    disburser: Arc<dyn Disburser>,
}

impl WithdrawalService {
    pub fn new(store: Arc<dyn BalanceStore>, disburser: Arc<dyn Disburser>) -> Self {
        Self { store, disburser }
    }

    /// Execute one withdrawal.
    ///
    /// # Returns
    ///
    /// A [`WithdrawalReceipt`] with the balance remaining after the debit.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidRequest`]: amount is zero or negative; nothing
    ///   was read or written
    /// - [`AppError::AccountNotFound`]: no such account; no mutation
    /// - [`AppError::InsufficientBalance`]: balance below amount; no mutation,
    ///   no disbursement attempted
    /// - [`AppError::DisbursementFailed`]: the external call failed after the
    ///   debit; the balance has been restored
    /// - [`AppError::BalanceInconsistency`]: the compensating credit failed;
    ///   the account is left debited for an undisbursed withdrawal
    pub async fn withdraw(
        &self,
        account_id: Uuid,
        amount_cents: i64,
    ) -> Result<WithdrawalReceipt, AppError> {
        // Validate before touching the store
        if amount_cents <= 0 {
            return Err(AppError::InvalidRequest(
                "Amount must be positive".to_string(),
            ));
        }

        self.store
            .get_account(account_id)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        // Atomic conditional debit; rejects without mutating on insufficient funds
        let balance_cents = self.store.debit(account_id, amount_cents).await?;

        if let Err(err) = self.disburser.disburse(account_id, amount_cents).await {
            tracing::warn!(
                %account_id,
                amount_cents,
                error = %err,
                "disbursement failed, crediting amount back"
            );

            if let Err(credit_err) = self.store.credit(account_id, amount_cents).await {
                // Accounting discrepancy: the debit stands with no disbursement.
                // Escalate distinctly instead of folding into the ordinary failure.
                tracing::error!(
                    %account_id,
                    amount_cents,
                    error = %credit_err,
                    "compensating credit failed, account is over-debited"
                );
                return Err(AppError::BalanceInconsistency {
                    account_id,
                    amount_cents,
                });
            }

            return Err(AppError::DisbursementFailed(err.to_string()));
        }

        tracing::info!(%account_id, amount_cents, balance_cents, "withdrawal accepted");

        Ok(WithdrawalReceipt {
            account_id,
            amount_cents,
            balance_cents,
        })
    }
}
