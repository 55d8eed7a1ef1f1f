//! In-memory balance store backed by a concurrent map.
//!
//! `DashMap` shards its entries and locks per entry, so operations on
//! different accounts proceed concurrently while operations on the same
//! account are serialized. The sufficiency check and the balance mutation in
//! [`MemoryStore::debit`] happen under the same entry lock, which is what
//! makes the conditional debit atomic.

use crate::{error::AppError, models::account::Account, store::BalanceStore};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

/// Thread-safe in-memory account store.
///
/// Used by the test suites and by deployments that run without a database.
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: DashMap<Uuid, Account>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

#[async_trait]
impl BalanceStore for MemoryStore {
    async fn create_account(
        &self,
        account_name: String,
        initial_balance_cents: i64,
    ) -> Result<Account, AppError> {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            account_name,
            balance_cents: initial_balance_cents,
            created_at: now,
            updated_at: now,
        };
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, AppError> {
        // Snapshot at the time of the call; concurrent debits are not reflected
        Ok(self.accounts.get(&account_id).map(|a| a.value().clone()))
    }

    async fn debit(&self, account_id: Uuid, amount_cents: i64) -> Result<i64, AppError> {
        let mut account = self
            .accounts
            .get_mut(&account_id)
            .ok_or(AppError::AccountNotFound)?;

        // Check and mutate under the entry lock
        if account.balance_cents < amount_cents {
            return Err(AppError::InsufficientBalance);
        }

        account.balance_cents -= amount_cents;
        account.updated_at = Utc::now();
        Ok(account.balance_cents)
    }

    async fn credit(&self, account_id: Uuid, amount_cents: i64) -> Result<i64, AppError> {
        let mut account = self
            .accounts
            .get_mut(&account_id)
            .ok_or(AppError::AccountNotFound)?;

        account.balance_cents += amount_cents;
        account.updated_at = Utc::now();
        Ok(account.balance_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn store_with_balance(balance_cents: i64) -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let account = store
            .create_account("test".to_string(), balance_cents)
            .await
            .unwrap();
        (store, account.id)
    }

    #[tokio::test]
    async fn debit_reduces_balance() {
        let (store, id) = store_with_balance(1000).await;

        let remaining = store.debit(id, 400).await.unwrap();

        assert_eq!(remaining, 600);
        assert_eq!(store.get_account(id).await.unwrap().unwrap().balance_cents, 600);
    }

    #[tokio::test]
    async fn debit_fails_without_mutation_on_insufficient_balance() {
        let (store, id) = store_with_balance(1000).await;

        let result = store.debit(id, 2000).await;

        assert!(matches!(result, Err(AppError::InsufficientBalance)));
        assert_eq!(
            store.get_account(id).await.unwrap().unwrap().balance_cents,
            1000
        );
    }

    #[tokio::test]
    async fn debit_unknown_account_is_not_found() {
        let store = MemoryStore::new();

        let result = store.debit(Uuid::new_v4(), 100).await;

        assert!(matches!(result, Err(AppError::AccountNotFound)));
    }

    #[tokio::test]
    async fn credit_restores_a_debit() {
        let (store, id) = store_with_balance(1000).await;

        store.debit(id, 1000).await.unwrap();
        let restored = store.credit(id, 1000).await.unwrap();

        assert_eq!(restored, 1000);
    }

    #[tokio::test]
    async fn concurrent_debits_cannot_overdraw() {
        let (store, id) = store_with_balance(1000).await;
        let store = Arc::new(store);

        // Combined amount exceeds the balance: exactly one debit may pass
        let mut handles = Vec::new();
        for _ in 0..2 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.debit(id, 700).await }));
        }

        let mut accepted = 0;
        let mut insufficient = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(AppError::InsufficientBalance) => insufficient += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(insufficient, 1);
        assert_eq!(
            store.get_account(id).await.unwrap().unwrap().balance_cents,
            300
        );
    }
}
