//! Transactions panel rendering - HTMX endpoints
//!
//! Endpoints:
//! - htmx_transactions_panel: Summary cards plus the transaction table
//! - htmx_select_account: Move the selection and re-render the table
//! - htmx_transaction_create_form / htmx_transaction_edit_form: Inline forms
//! - htmx_transaction_store / htmx_transaction_update / htmx_transaction_delete
//!
//! Helper functions:
//! - render_transactions_panel: Panel markup for a selection and its rows

use crate::{error_html, success_html, AppState};
use axum::extract::Path;
use axum::response::{Html, IntoResponse};
use axum::Form;
use ledgerpro_core::{
    Account, FetchOutcome, Ledger, LedgerEntry, Transaction, TransactionDraft, TransactionOp,
};
use ledgerpro_utils::{format_amount, or_dash, sanitize_html};
use rust_decimal::Decimal;

/// Form payload shared by the create and edit forms
///
/// Everything arrives as text; blank fields become absent draft fields
/// and unparseable amounts fall back to zero.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    #[serde(default)]
    pub date_of_entry: String,
    #[serde(default)]
    pub due_on: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub debit: String,
    #[serde(default)]
    pub credit: String,
}

impl TransactionForm {
    pub fn into_draft(self) -> TransactionDraft {
        TransactionDraft {
            date_of_entry: self.date_of_entry.trim().parse().ok(),
            due_on: self.due_on.trim().parse().ok(),
            reference: Some(self.reference),
            description: Some(self.description),
            remarks: Some(self.remarks),
            debit: parse_amount(&self.debit),
            credit: parse_amount(&self.credit),
        }
    }
}

fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

/// Form payload for the account selector
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectForm {
    #[serde(default)]
    pub account_id: String,
}

// ==================== Panel Rendering ====================

/// Render the transactions panel: summary cards, form slot, and table
pub fn render_transactions_panel(selected: Option<&Account>, rows: &[LedgerEntry]) -> String {
    let account_name = match selected {
        Some(account) => sanitize_html(&account.name),
        None => "No account selected".to_string(),
    };
    let add_button = match selected {
        Some(account) if !account.closed => {
            r#"<button hx-get='/dashboard/transactions/new' hx-target='#transaction-form-slot' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>+ Add Transaction</button>"#
        }
        Some(_) => {
            r#"<button disabled title='Account is closed' class='px-4 py-2 bg-gray-200 text-gray-500 rounded-lg cursor-not-allowed'>+ Add Transaction</button>"#
        }
        None => {
            r#"<button disabled title='Select an account first' class='px-4 py-2 bg-gray-200 text-gray-500 rounded-lg cursor-not-allowed'>+ Add Transaction</button>"#
        }
    };
    let count_label = if selected.is_some() {
        format!("{} items", rows.len())
    } else {
        "-".to_string()
    };
    let body = if selected.is_none() {
        "<div class='p-6 text-gray-500'>Select an account to view transactions.</div>".to_string()
    } else if rows.is_empty() {
        "<div class='p-6 text-gray-500'>No transactions yet.</div>".to_string()
    } else {
        render_transactions_table(rows)
    };

    format!(
        r#"<section class='grid grid-cols-1 md:grid-cols-2 gap-4 mb-6'>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-sm text-gray-600'>Selected Account</p>
            <p class='text-2xl font-bold'>{}</p>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-sm text-gray-600 mb-2'>Quick Actions</p>
            <div class='flex gap-2'>
                {}
                <button hx-get='/dashboard/transactions' hx-target='#transactions-panel' class='px-4 py-2 border rounded-lg hover:bg-gray-100'>Refresh</button>
            </div>
        </div>
    </section>
    <div id='transaction-form-slot'></div>
    <div class='bg-white rounded-xl shadow-sm'>
        <div class='flex items-center justify-between p-4 border-b'>
            <h3 class='text-lg font-semibold'>Transactions</h3>
            <span class='text-sm text-gray-500'>{}</span>
        </div>
        {}
    </div>"#,
        account_name, add_button, count_label, body
    )
}

fn render_transactions_table(rows: &[LedgerEntry]) -> String {
    let body: String = rows.iter().map(render_row).collect();
    format!(
        r#"<div class='overflow-x-auto'><table class='w-full text-sm'>
        <thead><tr class='text-left text-gray-500 border-b'>
            <th class='px-4 py-2'>Date</th>
            <th class='px-4 py-2'>Due Date</th>
            <th class='px-4 py-2'>Ref</th>
            <th class='px-4 py-2'>Description</th>
            <th class='px-4 py-2'>Remarks</th>
            <th class='px-4 py-2 text-right'>Debit</th>
            <th class='px-4 py-2 text-right'>Credit</th>
            <th class='px-4 py-2 text-right'>Balance</th>
            <th class='px-4 py-2'>Actions</th>
        </tr></thead>
        <tbody>{}</tbody>
    </table></div>"#,
        body
    )
}

fn render_row(entry: &LedgerEntry) -> String {
    let txn = &entry.transaction;
    format!(
        r#"<tr class='border-b hover:bg-gray-50'>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2 text-right'>{}</td>
        <td class='px-4 py-2 text-right'>{}</td>
        <td class='px-4 py-2 text-right font-medium'>{}</td>
        <td class='px-4 py-2'>
            <button hx-get='/dashboard/transactions/{}/edit' hx-target='#transaction-form-slot' class='text-sm text-indigo-600 hover:text-indigo-800 mr-2'>Edit</button>
            <button hx-delete='/dashboard/transactions/{}' hx-confirm='Delete this transaction?' hx-target='#transactions-panel' class='text-sm text-red-600 hover:text-red-800'>Delete</button>
        </td>
    </tr>"#,
        txn.date_of_entry,
        txn.due_on
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        sanitize_html(&or_dash(txn.reference.as_deref())),
        sanitize_html(&or_dash(txn.description.as_deref())),
        sanitize_html(&or_dash(txn.remarks.as_deref())),
        amount_or_dash(txn.debit),
        amount_or_dash(txn.credit),
        format_amount(entry.balance),
        txn.id,
        txn.id
    )
}

fn amount_or_dash(value: Decimal) -> String {
    if value.is_zero() {
        "-".to_string()
    } else {
        format_amount(value)
    }
}

fn stale_retry_html() -> String {
    String::from(
        r#"<div hx-get='/dashboard/transactions' hx-target='#transactions-panel' hx-trigger='load' class='p-6 text-gray-500'>Loading transactions&hellip;</div>"#,
    )
}

pub(crate) async fn transactions_panel_html(ledger: &Ledger) -> String {
    let selected = match ledger.selected_account() {
        Some(id) => match ledger.list_accounts().await {
            Ok(accounts) => accounts.into_iter().find(|account| account.id == id),
            Err(e) => return error_html("Load failed", &e.to_string()),
        },
        None => None,
    };
    match ledger.selected_transactions().await {
        Ok(FetchOutcome::Loaded(rows)) => render_transactions_panel(selected.as_ref(), &rows),
        Ok(FetchOutcome::Stale) => stale_retry_html(),
        Err(e) => error_html("Load failed", &e.to_string()),
    }
}

// ==================== Handlers ====================

/// Transactions panel partial
pub async fn htmx_transactions_panel(state: axum::extract::State<AppState>) -> Html<String> {
    let ledger = state.ledger.read().await;
    Html(transactions_panel_html(&ledger).await)
}

/// Move the selection and re-render the panel (HTMX)
pub async fn htmx_select_account(
    state: axum::extract::State<AppState>,
    Form(form): Form<SelectForm>,
) -> Html<String> {
    let ledger = state.ledger.write().await;
    ledger.select_account(Some(form.account_id));
    Html(transactions_panel_html(&ledger).await)
}

/// Render the create form for the selected account
pub async fn htmx_transaction_create_form(
    state: axum::extract::State<AppState>,
) -> Html<String> {
    let ledger = state.ledger.read().await;
    if ledger.selected_account().is_none() {
        return Html(error_html("Cannot add transaction", "Select an account first"));
    }
    Html(render_transaction_form(
        "Add Transaction",
        "hx-post='/dashboard/transactions'",
        "Add Transaction",
        &TransactionForm::default(),
    ))
}

/// Render the edit form for one row of the current table
pub async fn htmx_transaction_edit_form(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
) -> Html<String> {
    let ledger = state.ledger.read().await;
    let rows = match ledger.selected_transactions().await {
        Ok(FetchOutcome::Loaded(rows)) => rows,
        Ok(FetchOutcome::Stale) => return Html(stale_retry_html()),
        Err(e) => return Html(error_html("Load failed", &e.to_string())),
    };
    match rows.iter().find(|entry| entry.transaction.id == id) {
        Some(entry) => {
            let submit_attr = format!("hx-put='/dashboard/transactions/{}'", id);
            Html(render_transaction_form(
                "Edit Transaction",
                &submit_attr,
                "Update",
                &form_values(&entry.transaction),
            ))
        }
        None => Html(error_html("Load failed", "Transaction not found")),
    }
}

/// Store a new transaction against the selected account (HTMX)
///
/// A successful save fires both panel triggers: the table changed and
/// the account ranking may have moved.
pub async fn htmx_transaction_store(
    state: axum::extract::State<AppState>,
    Form(form): Form<TransactionForm>,
) -> axum::response::Response {
    let ledger = state.ledger.write().await;
    let account_id = ledger.selected_account().unwrap_or_default();
    match ledger
        .mutate_transaction(&account_id, TransactionOp::Create(form.into_draft()))
        .await
    {
        Ok(_) => (
            [("HX-Trigger", "transactions-changed, accounts-changed")],
            Html(success_html("Transaction saved")),
        )
            .into_response(),
        Err(e) => Html(error_html("Save failed", &e.to_string())).into_response(),
    }
}

/// Update a transaction on the selected account (HTMX)
pub async fn htmx_transaction_update(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TransactionForm>,
) -> axum::response::Response {
    let ledger = state.ledger.write().await;
    let account_id = ledger.selected_account().unwrap_or_default();
    match ledger
        .mutate_transaction(
            &account_id,
            TransactionOp::Update {
                transaction_id: id,
                draft: form.into_draft(),
            },
        )
        .await
    {
        Ok(_) => (
            [("HX-Trigger", "transactions-changed, accounts-changed")],
            Html(success_html("Transaction updated")),
        )
            .into_response(),
        Err(e) => Html(error_html("Save failed", &e.to_string())).into_response(),
    }
}

/// Delete a transaction and re-render the panel (HTMX)
pub async fn htmx_transaction_delete(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let ledger = state.ledger.write().await;
    let account_id = ledger.selected_account().unwrap_or_default();
    match ledger
        .mutate_transaction(&account_id, TransactionOp::Delete { transaction_id: id })
        .await
    {
        Ok(_) => {
            let panel = transactions_panel_html(&ledger).await;
            ([("HX-Trigger", "accounts-changed")], Html(panel)).into_response()
        }
        Err(e) => {
            let panel = transactions_panel_html(&ledger).await;
            Html(format!(
                "{}{}",
                error_html("Delete failed", &e.to_string()),
                panel
            ))
            .into_response()
        }
    }
}

// ==================== Form Rendering ====================

fn render_transaction_form(
    heading: &str,
    submit_attr: &str,
    submit_label: &str,
    values: &TransactionForm,
) -> String {
    format!(
        r#"<form {} hx-target='#transaction-form-result' hx-swap='innerHTML' class='border rounded-lg p-4 bg-gray-50 mb-6'>
        <h4 class='font-semibold mb-3'>{}</h4>
        <div class='grid grid-cols-1 md:grid-cols-2 gap-4'>
            <label class='block'>
                <div class='text-sm font-medium text-gray-700 mb-1'>Date</div>
                <input type='date' name='dateOfEntry' value='{}' required class='w-full px-3 py-2.5 border rounded-lg'>
            </label>
            <label class='block'>
                <div class='text-sm font-medium text-gray-700 mb-1'>Due on (Optional)</div>
                <input type='date' name='dueOn' value='{}' class='w-full px-3 py-2.5 border rounded-lg'>
            </label>
            <label class='block md:col-span-2'>
                <div class='text-sm font-medium text-gray-700 mb-1'>Reference #</div>
                <input type='text' name='reference' value='{}' class='w-full px-3 py-2.5 border rounded-lg' placeholder='Optional'>
            </label>
            <label class='block md:col-span-2'>
                <div class='text-sm font-medium text-gray-700 mb-1'>Description</div>
                <input type='text' name='description' value='{}' class='w-full px-3 py-2.5 border rounded-lg' placeholder='Description'>
            </label>
            <label class='block md:col-span-2'>
                <div class='text-sm font-medium text-gray-700 mb-1'>Remarks</div>
                <input type='text' name='remarks' value='{}' class='w-full px-3 py-2.5 border rounded-lg' placeholder='Optional remarks'>
            </label>
            <label class='block'>
                <div class='text-sm font-medium text-gray-700 mb-1'>Debit</div>
                <input type='number' name='debit' step='0.01' value='{}' class='w-full px-3 py-2.5 border rounded-lg' placeholder='0.00'>
            </label>
            <label class='block'>
                <div class='text-sm font-medium text-gray-700 mb-1'>Credit</div>
                <input type='number' name='credit' step='0.01' value='{}' class='w-full px-3 py-2.5 border rounded-lg' placeholder='0.00'>
            </label>
        </div>
        <div class='flex items-center gap-2 mt-4'>
            <button type='button' hx-get='/dashboard/transactions' hx-target='#transactions-panel' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-100'>Cancel</button>
            <button type='submit' class='px-3 py-1.5 text-sm bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>{}</button>
        </div>
        <div id='transaction-form-result' class='mt-3'></div>
    </form>"#,
        submit_attr,
        heading,
        attr_escape(&values.date_of_entry),
        attr_escape(&values.due_on),
        attr_escape(&values.reference),
        attr_escape(&values.description),
        attr_escape(&values.remarks),
        attr_escape(&values.debit),
        attr_escape(&values.credit),
        submit_label
    )
}

fn form_values(txn: &Transaction) -> TransactionForm {
    TransactionForm {
        date_of_entry: txn.date_of_entry.to_string(),
        due_on: txn.due_on.map(|d| d.to_string()).unwrap_or_default(),
        reference: txn.reference.clone().unwrap_or_default(),
        description: txn.description.clone().unwrap_or_default(),
        remarks: txn.remarks.clone().unwrap_or_default(),
        debit: if txn.debit.is_zero() {
            String::new()
        } else {
            txn.debit.to_string()
        },
        credit: if txn.credit.is_zero() {
            String::new()
        } else {
            txn.credit.to_string()
        },
    }
}

fn attr_escape(value: &str) -> String {
    sanitize_html(value).replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn account(closed: bool) -> Account {
        Account {
            id: "acct-1".to_string(),
            name: "Cash".to_string(),
            closed,
        }
    }

    fn entry(id: &str, debit: i64, credit: i64, balance: i64) -> LedgerEntry {
        LedgerEntry {
            transaction: Transaction {
                id: id.to_string(),
                account_id: "acct-1".to_string(),
                date_of_entry: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                due_on: None,
                reference: None,
                description: None,
                remarks: None,
                debit: Decimal::new(debit, 0),
                credit: Decimal::new(credit, 0),
            },
            balance: Decimal::new(balance, 0),
        }
    }

    #[test]
    fn test_panel_prompts_for_selection() {
        let html = render_transactions_panel(None, &[]);
        assert!(html.contains("No account selected"));
        assert!(html.contains("Select an account to view transactions."));
        assert!(html.contains("Select an account first"));
    }

    #[test]
    fn test_panel_shows_empty_state_for_selected_account() {
        let html = render_transactions_panel(Some(&account(false)), &[]);
        assert!(html.contains("Cash"));
        assert!(html.contains("No transactions yet."));
        assert!(html.contains("0 items"));
    }

    #[test]
    fn test_panel_disables_add_for_closed_account() {
        let html = render_transactions_panel(Some(&account(true)), &[]);
        assert!(html.contains("Account is closed"));
    }

    #[test]
    fn test_table_uses_dash_placeholders_and_formats_amounts() {
        let rows = vec![entry("txn-1", 0, 100, 100)];
        let html = render_transactions_panel(Some(&account(false)), &rows);
        assert!(html.contains("1 items"));
        assert!(html.contains("<td class='px-4 py-2'>-</td>"));
        assert!(html.contains("<td class='px-4 py-2 text-right'>-</td>"));
        assert!(html.contains("100.00"));
        assert!(html.contains("2026-01-05"));
    }

    #[test]
    fn test_rows_carry_edit_and_delete_actions() {
        let rows = vec![entry("txn-9", 25, 0, -25)];
        let html = render_transactions_panel(Some(&account(false)), &rows);
        assert!(html.contains("hx-get='/dashboard/transactions/txn-9/edit'"));
        assert!(html.contains("hx-delete='/dashboard/transactions/txn-9'"));
        assert!(html.contains("hx-confirm='Delete this transaction?'"));
    }

    #[test]
    fn test_form_prefills_and_escapes_values() {
        let mut txn = entry("txn-1", 0, 50, 50).transaction;
        txn.reference = Some("A&B 'shop'".to_string());
        let html = render_transaction_form(
            "Edit Transaction",
            "hx-put='/dashboard/transactions/txn-1'",
            "Update",
            &form_values(&txn),
        );
        assert!(html.contains("value='A&amp;B &#39;shop&#39;'"));
        assert!(html.contains("value='2026-01-05'"));
        assert!(html.contains("value='50'"));
        assert!(html.contains("hx-put='/dashboard/transactions/txn-1'"));
    }

    #[test]
    fn test_form_parses_dates_and_amounts() {
        let form = TransactionForm {
            date_of_entry: "2026-01-05".to_string(),
            debit: "12.50".to_string(),
            ..TransactionForm::default()
        };
        let draft = form.into_draft();
        assert_eq!(
            draft.date_of_entry,
            Some(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        );
        assert_eq!(draft.debit, Some(Decimal::new(1250, 2)));
        assert_eq!(draft.credit, None);
    }

    #[test]
    fn test_form_treats_garbage_amounts_as_absent() {
        let form = TransactionForm {
            date_of_entry: "2026-01-05".to_string(),
            debit: "abc".to_string(),
            ..TransactionForm::default()
        };
        assert_eq!(form.into_draft().debit, None);
    }

    #[test]
    fn test_stale_render_reloads_the_panel() {
        let html = stale_retry_html();
        assert!(html.contains("hx-trigger='load'"));
        assert!(html.contains("hx-target='#transactions-panel'"));
    }
}
