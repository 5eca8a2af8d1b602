//! Transactions API endpoints - JSON responses
//!
//! Endpoints:
//! - api_transactions: Ordered rows with running balances for one account
//! - api_transaction_create: Create a transaction
//! - api_transaction_update: Update a transaction
//! - api_transaction_delete: Delete a transaction
//! - api_select_account: Move the dashboard selection

use crate::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, Query};
use axum::Json;
use chrono::NaiveDate;
use ledgerpro_core::{LedgerEntry, MutationOutcome, TransactionDraft, TransactionOp};
use ledgerpro_utils::format_amount;

/// One row of the transaction table, amounts formatted for display
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: String,
    pub account_id: String,
    pub date_of_entry: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}

impl TransactionRow {
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        let txn = &entry.transaction;
        TransactionRow {
            id: txn.id.clone(),
            account_id: txn.account_id.clone(),
            date_of_entry: txn.date_of_entry,
            due_on: txn.due_on,
            reference: txn.reference.clone(),
            description: txn.description.clone(),
            remarks: txn.remarks.clone(),
            debit: format_amount(txn.debit),
            credit: format_amount(txn.credit),
            balance: format_amount(entry.balance),
        }
    }
}

/// Mutation payload: the target account plus the draft fields
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(flatten)]
    pub draft: TransactionDraft,
}

/// Query parameters for transaction deletion
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Payload for the selection endpoint
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPayload {
    #[serde(default)]
    pub account_id: Option<String>,
}

/// List one account's transactions (JSON API)
///
/// Rows come back newest-first with the running balance attached.
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    Path(account_id): Path<String>,
) -> ApiResult<String> {
    let ledger = state.ledger.read().await;
    let entries = ledger.list_transactions(&account_id).await?;
    let rows: Vec<TransactionRow> = entries.iter().map(TransactionRow::from_entry).collect();
    Ok(serde_json::to_string(&rows).unwrap_or_default())
}

/// Create a transaction (JSON API)
pub async fn api_transaction_create(
    state: axum::extract::State<AppState>,
    Json(payload): Json<TransactionPayload>,
) -> ApiResult<String> {
    let ledger = state.ledger.write().await;
    let account_id = payload.account_id.unwrap_or_default();
    let outcome = ledger
        .mutate_transaction(&account_id, TransactionOp::Create(payload.draft))
        .await?;
    respond_with_outcome(outcome)
}

/// Update a transaction (JSON API)
///
/// The payload carries the owning account so the closed-account guard
/// can run before the store is touched.
pub async fn api_transaction_update(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionPayload>,
) -> ApiResult<String> {
    let ledger = state.ledger.write().await;
    let account_id = payload.account_id.unwrap_or_default();
    let outcome = ledger
        .mutate_transaction(
            &account_id,
            TransactionOp::Update {
                transaction_id: id,
                draft: payload.draft,
            },
        )
        .await?;
    respond_with_outcome(outcome)
}

/// Delete a transaction (JSON API)
///
/// The owning account comes in as the `accountId` query parameter.
pub async fn api_transaction_delete(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<String> {
    let ledger = state.ledger.write().await;
    let account_id = params.account_id.unwrap_or_default();
    let outcome = ledger
        .mutate_transaction(&account_id, TransactionOp::Delete { transaction_id: id })
        .await?;
    respond_with_outcome(outcome)
}

/// Move the dashboard selection (JSON API)
pub async fn api_select_account(
    state: axum::extract::State<AppState>,
    Json(payload): Json<SelectPayload>,
) -> String {
    let ledger = state.ledger.write().await;
    ledger.select_account(payload.account_id);
    let selected = serde_json::to_string(&ledger.selected_account())
        .unwrap_or_else(|_| "null".to_string());
    format!(r#"{{"selected": {}}}"#, selected)
}

fn respond_with_outcome(outcome: MutationOutcome) -> ApiResult<String> {
    match outcome {
        MutationOutcome::Created(txn) | MutationOutcome::Updated(txn) => {
            Ok(serde_json::to_string(&txn).unwrap_or_default())
        }
        MutationOutcome::Deleted => Ok(r#"{"success": true}"#.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerpro_core::Transaction;
    use rust_decimal::Decimal;

    fn entry(debit: Decimal, credit: Decimal, balance: Decimal) -> LedgerEntry {
        LedgerEntry {
            transaction: Transaction {
                id: "txn-1".to_string(),
                account_id: "acct-1".to_string(),
                date_of_entry: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                due_on: None,
                reference: Some("INV-42".to_string()),
                description: None,
                remarks: None,
                debit,
                credit,
            },
            balance,
        }
    }

    #[test]
    fn test_row_formats_amounts_with_two_decimals() {
        let row = TransactionRow::from_entry(&entry(
            Decimal::ZERO,
            Decimal::new(755, 1),
            Decimal::new(755, 1),
        ));
        assert_eq!(row.debit, "0.00");
        assert_eq!(row.credit, "75.50");
        assert_eq!(row.balance, "75.50");
    }

    #[test]
    fn test_row_serializes_with_wire_field_names() {
        let row = TransactionRow::from_entry(&entry(
            Decimal::ZERO,
            Decimal::new(100, 0),
            Decimal::new(100, 0),
        ));
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains(r#""accountId":"acct-1""#));
        assert!(json.contains(r#""dateOfEntry":"2026-01-05""#));
        assert!(json.contains(r#""reference":"INV-42""#));
        assert!(!json.contains("dueOn"));
    }

    #[test]
    fn test_payload_accepts_numeric_amounts() {
        let payload: TransactionPayload = serde_json::from_str(
            r#"{"accountId":"acct-1","dateOfEntry":"2026-01-05","debit":75,"credit":0,"description":"Office chairs"}"#,
        )
        .unwrap();
        assert_eq!(payload.account_id.as_deref(), Some("acct-1"));
        assert_eq!(payload.draft.debit, Some(Decimal::new(75, 0)));
        assert_eq!(payload.draft.description.as_deref(), Some("Office chairs"));
    }

    #[test]
    fn test_delete_outcome_reports_success() {
        let body = respond_with_outcome(MutationOutcome::Deleted).unwrap();
        assert_eq!(body, r#"{"success": true}"#);
    }
}
