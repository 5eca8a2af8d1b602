//! In-memory stores for tests and ephemeral runs

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::types::{AccountRecord, StoreData, Transaction, TransactionFields};
use crate::{generate_record_id, FlagStore, RecordStore};

/// Record store held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with records
    pub fn with_records(accounts: Vec<AccountRecord>, transactions: Vec<Transaction>) -> Self {
        Self {
            data: RwLock::new(StoreData {
                accounts,
                transactions,
            }),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_accounts(&self) -> StoreResult<Vec<AccountRecord>> {
        Ok(self.data.read().await.accounts.clone())
    }

    async fn fetch_transactions(&self, account_id: &str) -> StoreResult<Vec<Transaction>> {
        Ok(self.data.read().await.account_transactions(account_id))
    }

    async fn create_transaction(
        &self,
        account_id: &str,
        fields: TransactionFields,
    ) -> StoreResult<Transaction> {
        let mut data = self.data.write().await;
        if data.find_account(account_id).is_none() {
            return Err(StoreError::AccountNotFound {
                id: account_id.to_string(),
            });
        }
        let seed = format!("{}:{}", account_id, data.transactions.len());
        let txn = Transaction::from_fields(
            generate_record_id("txn", &seed),
            account_id.to_string(),
            fields,
        );
        data.transactions.push(txn.clone());
        Ok(txn)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        fields: TransactionFields,
    ) -> StoreResult<Transaction> {
        self.data
            .write()
            .await
            .update_transaction(transaction_id, fields)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> StoreResult<()> {
        self.data.write().await.remove_transaction(transaction_id)
    }

    async fn create_account(&self, name: &str) -> StoreResult<AccountRecord> {
        let mut data = self.data.write().await;
        let seed = format!("{}:{}", name, data.accounts.len());
        let record = AccountRecord {
            id: generate_record_id("acc", &seed),
            name: name.to_string(),
        };
        data.accounts.push(record.clone());
        Ok(record)
    }
}

/// Flag registry held entirely in process memory
#[derive(Default)]
pub struct MemoryFlagStore {
    flags: RwLock<HashMap<String, bool>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn load(&self) -> StoreResult<HashMap<String, bool>> {
        Ok(self.flags.read().await.clone())
    }

    async fn save(&self, flags: &HashMap<String, bool>) -> StoreResult<()> {
        *self.flags.write().await = flags.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn fields(date: &str) -> TransactionFields {
        TransactionFields {
            date_of_entry: date.parse().unwrap(),
            due_on: None,
            reference: None,
            description: None,
            remarks: None,
            debit: Decimal::ZERO,
            credit: Decimal::new(10, 0),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let account = store.create_account("Cash").await.unwrap();
        let t1 = store
            .create_transaction(&account.id, fields("2024-01-10"))
            .await
            .unwrap();
        let t2 = store
            .create_transaction(&account.id, fields("2024-01-10"))
            .await
            .unwrap();
        assert_ne!(t1.id, t2.id);
    }

    #[tokio::test]
    async fn test_fetch_transactions_scoped_to_account() {
        let store = MemoryStore::new();
        let a = store.create_account("Cash").await.unwrap();
        let b = store.create_account("Bank").await.unwrap();
        store
            .create_transaction(&a.id, fields("2024-01-10"))
            .await
            .unwrap();

        assert_eq!(store.fetch_transactions(&a.id).await.unwrap().len(), 1);
        assert!(store.fetch_transactions(&b.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_delete_again_fails() {
        let store = MemoryStore::new();
        let account = store.create_account("Cash").await.unwrap();
        let txn = store
            .create_transaction(&account.id, fields("2024-01-10"))
            .await
            .unwrap();

        store.delete_transaction(&txn.id).await.unwrap();
        let err = store.delete_transaction(&txn.id).await.unwrap_err();
        assert!(matches!(err, StoreError::TransactionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_memory_flag_store_round_trip() {
        let registry = MemoryFlagStore::new();
        let mut flags = HashMap::new();
        flags.insert("acc-1".to_string(), true);
        registry.save(&flags).await.unwrap();
        assert_eq!(registry.load().await.unwrap(), flags);
    }
}
