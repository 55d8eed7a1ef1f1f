//! PostgreSQL balance store.
//!
//! Balances live in the `accounts` table (see `migrations/`). The conditional
//! debit locks the account row with `SELECT ... FOR UPDATE` inside a database
//! transaction, so the sufficiency check and the balance update commit
//! atomically. Concurrent debits against the same account queue on the row
//! lock and each re-checks the balance it actually observes.

use crate::{
    db::DbPool,
    error::AppError,
    models::account::Account,
    store::BalanceStore,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Balance store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: DbPool,
}

impl PostgresStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BalanceStore for PostgresStore {
    async fn create_account(
        &self,
        account_name: String,
        initial_balance_cents: i64,
    ) -> Result<Account, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (account_name, balance_cents)
            VALUES ($1, $2)
            RETURNING id, account_name, balance_cents, created_at, updated_at
            "#,
        )
        .bind(account_name)
        .bind(initial_balance_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn debit(&self, account_id: Uuid, amount_cents: i64) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row; FOR UPDATE blocks concurrent debits of the same account
        let balance_cents: i64 =
            sqlx::query_scalar("SELECT balance_cents FROM accounts WHERE id = $1 FOR UPDATE")
                .bind(account_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(AppError::AccountNotFound)?;

        if balance_cents < amount_cents {
            tx.rollback().await?;
            return Err(AppError::InsufficientBalance);
        }

        let new_balance: i64 = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance_cents = balance_cents - $1,
                updated_at = NOW()
            WHERE id = $2
            RETURNING balance_cents
            "#,
        )
        .bind(amount_cents)
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(new_balance)
    }

    async fn credit(&self, account_id: Uuid, amount_cents: i64) -> Result<i64, AppError> {
        // Single statement, so no explicit transaction is needed
        let new_balance: i64 = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance_cents = balance_cents + $1,
                updated_at = NOW()
            WHERE id = $2
            RETURNING balance_cents
            "#,
        )
        .bind(amount_cents)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::AccountNotFound)?;

        Ok(new_balance)
    }
}
