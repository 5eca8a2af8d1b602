//! Accounts panel rendering - HTMX endpoints
//!
//! Endpoints:
//! - htmx_accounts_panel: Accounts card with selector and close toggles
//! - htmx_account_create_form: Inline account create form
//! - htmx_account_store: Store a new account
//! - htmx_account_toggle: Flip an account's closed flag

use crate::{error_html, success_html, AppState};
use axum::extract::Path;
use axum::response::{Html, IntoResponse};
use axum::Form;
use ledgerpro_core::{Account, Ledger};
use ledgerpro_utils::sanitize_html;

/// Form payload for account creation
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AccountForm {
    #[serde(default)]
    pub name: String,
}

/// Render the accounts card: selector, create form slot, toggle list
///
/// Accounts arrive already ranked; the markup preserves their order.
pub fn render_accounts_panel(accounts: &[Account], selected: Option<&str>) -> String {
    let options: String = accounts
        .iter()
        .map(|account| {
            let selected_attr = if Some(account.id.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            let suffix = if account.closed { " (closed)" } else { "" };
            format!(
                "<option value='{}'{}>{}{}</option>",
                account.id,
                selected_attr,
                sanitize_html(&account.name),
                suffix
            )
        })
        .collect();

    let rows: String = accounts
        .iter()
        .map(|account| {
            let (badge, badge_class, action) = if account.closed {
                ("Closed", "bg-gray-100 text-gray-500", "Reopen")
            } else {
                ("Open", "bg-green-50 text-green-700", "Close")
            };
            format!(
                r#"<li class='flex items-center justify-between py-2'>
                <span>{}</span>
                <span class='flex items-center gap-2'>
                    <span class='px-2 py-0.5 text-xs rounded-full {}'>{}</span>
                    <button hx-post='/dashboard/accounts/{}/closed' hx-target='#accounts-panel' class='text-sm text-indigo-600 hover:text-indigo-800'>{}</button>
                </span>
            </li>"#,
                sanitize_html(&account.name),
                badge_class,
                badge,
                account.id,
                action
            )
        })
        .collect();

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
        <div class='flex items-center justify-between mb-4'>
            <h3 class='text-lg font-semibold'>Accounts</h3>
            <button hx-get='/dashboard/accounts/new' hx-target='#account-form-slot' class='px-3 py-1.5 text-sm bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>+ Add Account</button>
        </div>
        <select name='accountId' hx-post='/dashboard/select' hx-target='#transactions-panel' class='w-full px-3 py-2.5 border rounded-lg bg-white'>
            <option value=''>Select account</option>
            {}
        </select>
        <div id='account-form-slot' class='mt-4'></div>
        <ul class='mt-4 divide-y'>{}</ul>
    </div>"#,
        options, rows
    )
}

pub(crate) async fn accounts_panel_html(ledger: &Ledger) -> String {
    match ledger.list_accounts().await {
        Ok(accounts) => render_accounts_panel(&accounts, ledger.selected_account().as_deref()),
        Err(e) => error_html("Load failed", &e.to_string()),
    }
}

/// Accounts panel partial
pub async fn htmx_accounts_panel(state: axum::extract::State<AppState>) -> Html<String> {
    let ledger = state.ledger.read().await;
    Html(accounts_panel_html(&ledger).await)
}

/// Render the inline account create form
pub async fn htmx_account_create_form() -> Html<String> {
    Html(String::from(
        r#"<form hx-post='/dashboard/accounts' hx-target='#account-form-result' hx-swap='innerHTML' class='border rounded-lg p-4 bg-gray-50'>
        <h4 class='font-semibold mb-3'>Add New Account</h4>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Account name</label>
        <input type='text' name='name' autofocus class='w-full px-3 py-2.5 border rounded-lg' placeholder='e.g. Cash, Bank - Main, Expenses'>
        <div class='flex items-center gap-2 mt-3'>
            <button type='button' hx-get='/dashboard/accounts' hx-target='#accounts-panel' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-100'>Cancel</button>
            <button type='submit' class='px-3 py-1.5 text-sm bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Add Account</button>
        </div>
        <div id='account-form-result' class='mt-3'></div>
    </form>"#,
    ))
}

/// Store a new account (HTMX)
///
/// On success the accounts panel reloads itself through the
/// `accounts-changed` trigger, which also clears the form.
pub async fn htmx_account_store(
    state: axum::extract::State<AppState>,
    Form(form): Form<AccountForm>,
) -> axum::response::Response {
    let ledger = state.ledger.write().await;
    match ledger.create_account(&form.name).await {
        Ok(account) => {
            log::info!("created account '{}' ({})", account.name, account.id);
            (
                [("HX-Trigger", "accounts-changed")],
                Html(success_html("Account created")),
            )
                .into_response()
        }
        Err(e) => Html(error_html("Save failed", &e.to_string())).into_response(),
    }
}

/// Flip an account's closed flag (HTMX)
///
/// Closing the selected account clears the selection, so the response
/// also fires `transactions-changed` to refresh the transactions panel.
pub async fn htmx_account_toggle(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let ledger = state.ledger.write().await;
    let closed = ledger.is_closed(&id);
    match ledger.set_closed(&id, !closed).await {
        Ok(()) => {
            let panel = accounts_panel_html(&ledger).await;
            ([("HX-Trigger", "transactions-changed")], Html(panel)).into_response()
        }
        Err(e) => Html(error_html("Save failed", &e.to_string())).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str, closed: bool) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            closed,
        }
    }

    #[test]
    fn test_panel_lists_accounts_in_given_order() {
        let accounts = vec![
            account("acct-1", "Cash", false),
            account("acct-2", "Savings", false),
        ];
        let html = render_accounts_panel(&accounts, None);
        assert!(html.contains("<option value=''>Select account</option>"));
        let cash = html.find("Cash").unwrap();
        let savings = html.find("Savings").unwrap();
        assert!(cash < savings);
    }

    #[test]
    fn test_panel_marks_selected_and_closed_accounts() {
        let accounts = vec![
            account("acct-1", "Cash", false),
            account("acct-2", "Old Bank", true),
        ];
        let html = render_accounts_panel(&accounts, Some("acct-1"));
        assert!(html.contains("<option value='acct-1' selected>Cash</option>"));
        assert!(html.contains("Old Bank (closed)"));
        assert!(html.contains("Reopen"));
    }

    #[test]
    fn test_panel_escapes_account_names() {
        let accounts = vec![account("acct-1", "<script>", false)];
        let html = render_accounts_panel(&accounts, None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_create_form_names_the_field() {
        let Html(html) = htmx_account_create_form().await;
        assert!(html.contains("Add New Account"));
        assert!(html.contains("name='name'"));
        assert!(html.contains("e.g. Cash, Bank - Main, Expenses"));
    }
}
