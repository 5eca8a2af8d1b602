//! JSON-file-backed stores
//!
//! One JSON document holds all records; mutations rewrite the file so the
//! on-disk copy always matches what the process serves.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::types::{AccountRecord, StoreData, Transaction, TransactionFields};
use crate::{generate_record_id, FlagStore, RecordStore};

/// Record store persisted as a single JSON document
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl JsonFileStore {
    /// Open a store file, starting empty if the file does not exist yet
    pub async fn open(path: PathBuf) -> StoreResult<Self> {
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("ledger file {} not found, starting empty", path.display());
                StoreData::default()
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        log::info!(
            "loaded {} accounts and {} transactions from {}",
            data.accounts.len(),
            data.transactions.len(),
            path.display()
        );
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    // Mutations build the next state, flush it, then commit it in memory,
    // so a failed write never leaves the two copies disagreeing.
    async fn flush(&self, data: &StoreData) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
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
        let mut next = data.clone();
        next.transactions.push(txn.clone());
        self.flush(&next).await?;
        *data = next;
        Ok(txn)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        fields: TransactionFields,
    ) -> StoreResult<Transaction> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let txn = next.update_transaction(transaction_id, fields)?;
        self.flush(&next).await?;
        *data = next;
        Ok(txn)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        next.remove_transaction(transaction_id)?;
        self.flush(&next).await?;
        *data = next;
        Ok(())
    }

    async fn create_account(&self, name: &str) -> StoreResult<AccountRecord> {
        let mut data = self.data.write().await;
        let seed = format!("{}:{}", name, data.accounts.len());
        let record = AccountRecord {
            id: generate_record_id("acc", &seed),
            name: name.to_string(),
        };
        let mut next = data.clone();
        next.accounts.push(record.clone());
        self.flush(&next).await?;
        *data = next;
        Ok(record)
    }
}

/// Closed-account flag registry persisted as a JSON object
pub struct JsonFlagStore {
    path: PathBuf,
}

impl JsonFlagStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FlagStore for JsonFlagStore {
    async fn load(&self) -> StoreResult<HashMap<String, bool>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, flags: &HashMap<String, bool>) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(flags)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn fields(date: &str, credit: i64) -> TransactionFields {
        TransactionFields {
            date_of_entry: date.parse().unwrap(),
            due_on: None,
            reference: None,
            description: None,
            remarks: None,
            debit: Decimal::ZERO,
            credit: Decimal::new(credit, 0),
        }
    }

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("ledger.json"))
            .await
            .unwrap();
        assert!(store.fetch_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let store = JsonFileStore::open(path.clone()).await.unwrap();
        let account = store.create_account("Office Rent").await.unwrap();
        let txn = store
            .create_transaction(&account.id, fields("2024-01-10", 100))
            .await
            .unwrap();

        let reopened = JsonFileStore::open(path).await.unwrap();
        let accounts = reopened.fetch_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Office Rent");
        let transactions = reopened.fetch_transactions(&account.id).await.unwrap();
        assert_eq!(transactions, vec![txn]);
    }

    #[tokio::test]
    async fn test_create_transaction_requires_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("ledger.json"))
            .await
            .unwrap();
        let err = store
            .create_transaction("missing", fields("2024-01-10", 100))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AccountNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_transaction_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let store = JsonFileStore::open(path.clone()).await.unwrap();
        store.create_account("Cash").await.unwrap();

        let err = store
            .update_transaction("missing", fields("2024-01-10", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::TransactionNotFound { .. }));

        let reopened = JsonFileStore::open(path).await.unwrap();
        assert_eq!(reopened.fetch_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_flag_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let flags_path = dir.path().join("flags.json");
        let registry = JsonFlagStore::new(flags_path);

        assert!(registry.load().await.unwrap().is_empty());

        let mut flags = HashMap::new();
        flags.insert("acc-1".to_string(), true);
        flags.insert("acc-2".to_string(), false);
        registry.save(&flags).await.unwrap();

        assert_eq!(registry.load().await.unwrap(), flags);
    }
}
