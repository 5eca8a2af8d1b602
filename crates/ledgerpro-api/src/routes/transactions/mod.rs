//! Transaction routes - Ordered listing, selection, and guarded mutations
//!
//! Features:
//! - Newest-first transaction table with running balances
//! - Server-side account selection with stale-fetch discard
//! - Create/edit/delete forms guarded by the closed-account flag
//!
//! Structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX panel rendering

pub mod api;
pub mod page;

pub use api::{
    api_select_account, api_transaction_create, api_transaction_delete, api_transaction_update,
    api_transactions, TransactionPayload, TransactionRow,
};
pub use page::{
    htmx_select_account, htmx_transaction_create_form, htmx_transaction_delete,
    htmx_transaction_edit_form, htmx_transaction_store, htmx_transaction_update,
    htmx_transactions_panel, render_transactions_panel,
};
