//! Record types shared by every store implementation
//!
//! Field names serialize in camelCase to match the wire payloads the web
//! layer exchanges (`dateOfEntry`, `dueOn`, ...).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A stored account: opaque ID plus display name
///
/// The closed/open flag is not part of the record; it lives in the
/// client-local flag registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
}

/// A stored transaction
///
/// `id` is store-assigned and opaque; the engine only relies on IDs being
/// unique and totally ordered under plain string comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub date_of_entry: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
}

impl Transaction {
    /// Build a new transaction from store-assigned identity and field values
    pub fn from_fields(id: String, account_id: String, fields: TransactionFields) -> Self {
        Self {
            id,
            account_id,
            date_of_entry: fields.date_of_entry,
            due_on: fields.due_on,
            reference: fields.reference,
            description: fields.description,
            remarks: fields.remarks,
            debit: fields.debit,
            credit: fields.credit,
        }
    }

    /// Replace every mutable field, leaving identity and owning account alone
    pub fn apply(&mut self, fields: TransactionFields) {
        self.date_of_entry = fields.date_of_entry;
        self.due_on = fields.due_on;
        self.reference = fields.reference;
        self.description = fields.description;
        self.remarks = fields.remarks;
        self.debit = fields.debit;
        self.credit = fields.credit;
    }
}

/// The mutable fields of a transaction, as accepted by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFields {
    pub date_of_entry: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
}

/// Everything a store holds: the account list and the flat transaction list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl StoreData {
    /// Clone out the transactions belonging to one account
    pub fn account_transactions(&self, account_id: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect()
    }

    /// Apply new field values to a transaction by ID
    pub fn update_transaction(
        &mut self,
        transaction_id: &str,
        fields: TransactionFields,
    ) -> Result<Transaction, StoreError> {
        match self
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
        {
            Some(txn) => {
                txn.apply(fields);
                Ok(txn.clone())
            }
            None => Err(StoreError::TransactionNotFound {
                id: transaction_id.to_string(),
            }),
        }
    }

    /// Remove a transaction by ID
    pub fn remove_transaction(&mut self, transaction_id: &str) -> Result<(), StoreError> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != transaction_id);
        if self.transactions.len() == before {
            return Err(StoreError::TransactionNotFound {
                id: transaction_id.to_string(),
            });
        }
        Ok(())
    }

    /// Look up an account record by ID
    pub fn find_account(&self, account_id: &str) -> Option<&AccountRecord> {
        self.accounts.iter().find(|a| a.id == account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(date: &str, debit: i64, credit: i64) -> TransactionFields {
        TransactionFields {
            date_of_entry: date.parse().unwrap(),
            due_on: None,
            reference: None,
            description: None,
            remarks: None,
            debit: Decimal::new(debit, 0),
            credit: Decimal::new(credit, 0),
        }
    }

    #[test]
    fn test_transaction_serializes_camel_case() {
        let txn = Transaction::from_fields(
            "txn-1".to_string(),
            "acc-1".to_string(),
            TransactionFields {
                due_on: Some("2024-02-01".parse().unwrap()),
                reference: Some("INV-7".to_string()),
                ..fields("2024-01-10", 0, 100)
            },
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"accountId\":\"acc-1\""));
        assert!(json.contains("\"dateOfEntry\":\"2024-01-10\""));
        assert!(json.contains("\"dueOn\":\"2024-02-01\""));
        assert!(!json.contains("account_id"));
    }

    #[test]
    fn test_transaction_missing_amounts_default_to_zero() {
        let json = r#"{"id":"t1","accountId":"a1","dateOfEntry":"2024-01-10"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.debit, Decimal::ZERO);
        assert_eq!(txn.credit, Decimal::ZERO);
        assert!(txn.due_on.is_none());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut txn = Transaction::from_fields(
            "txn-1".to_string(),
            "acc-1".to_string(),
            fields("2024-01-10", 0, 100),
        );
        txn.apply(fields("2024-01-12", 30, 0));
        assert_eq!(txn.id, "txn-1");
        assert_eq!(txn.account_id, "acc-1");
        assert_eq!(txn.date_of_entry, "2024-01-12".parse().unwrap());
        assert_eq!(txn.debit, Decimal::new(30, 0));
    }

    #[test]
    fn test_store_data_account_transactions_filters() {
        let mut data = StoreData::default();
        data.transactions.push(Transaction::from_fields(
            "t1".to_string(),
            "a1".to_string(),
            fields("2024-01-10", 0, 100),
        ));
        data.transactions.push(Transaction::from_fields(
            "t2".to_string(),
            "a2".to_string(),
            fields("2024-01-11", 5, 0),
        ));
        let for_a1 = data.account_transactions("a1");
        assert_eq!(for_a1.len(), 1);
        assert_eq!(for_a1[0].id, "t1");
        assert!(data.account_transactions("a3").is_empty());
    }

    #[test]
    fn test_store_data_update_missing_transaction() {
        let mut data = StoreData::default();
        let err = data
            .update_transaction("missing", fields("2024-01-10", 0, 0))
            .unwrap_err();
        assert!(matches!(err, StoreError::TransactionNotFound { .. }));
    }

    #[test]
    fn test_store_data_remove_transaction() {
        let mut data = StoreData::default();
        data.transactions.push(Transaction::from_fields(
            "t1".to_string(),
            "a1".to_string(),
            fields("2024-01-10", 0, 100),
        ));
        data.remove_transaction("t1").unwrap();
        assert!(data.transactions.is_empty());
        assert!(data.remove_transaction("t1").is_err());
    }
}
